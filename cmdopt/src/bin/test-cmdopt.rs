// Test runner exercising the exit/stdout/stderr behavior of parse_or_exit.
//
// Variants are selected through the environment:
//   CMDOPT_VERSION_FLAGS  flags for the version option (default -V, --version)
//   CMDOPT_HELP_FLAGS     flags that trigger help (default -h, --help)
//   CMDOPT_ALLOW_UNKNOWN  any value tolerates unknown options

use cmdopt::*;

fn main() {
    let version_flags =
        std::env::var("CMDOPT_VERSION_FLAGS").unwrap_or_else(|_| DEFAULT_VERSION_FLAGS.into());

    let mut program = Program::new("test-cmdopt")
        .description("Exercise the option parser")
        .version_with("0.0.1", &version_flags, DEFAULT_VERSION_DESCRIPTION)
        .option(Opt::new("-p, --pepper").description("add pepper"))
        .option(Opt::new("-P, --pineapple").description("add pineapple"))
        .option(
            Opt::new("-c, --cheese [type]")
                .description("add the specified type of cheese")
                .default_val("marble"),
        )
        .option(Opt::new("-C, --no-cheese").description("you do not want any cheese"))
        .option(Opt::new("-k, --known <value>").description("a known option"))
        .option(
            Opt::new("-x, --collect <value>")
                .description("repeatable value")
                .coerce(coerce::collect)
                .default_val(Vec::<String>::new()),
        )
        .option(
            Opt::new("-i, --integer <n>")
                .description("an integer")
                .coerce(coerce::int),
        )
        .option(
            Opt::new("-l, --level")
                .description("increase the level")
                .coerce(coerce::increase)
                .default_val(0),
        )
        .option(Opt::new("--enable-notifications").description("turn notifications on"));

    if let Ok(flags) = std::env::var("CMDOPT_HELP_FLAGS") {
        program = program.help_option(&flags, "custom help");
    }
    if std::env::var_os("CMDOPT_ALLOW_UNKNOWN").is_some() {
        program = program.allow_unknown_option(true);
    }

    let parsed = program.parse_or_exit(std::env::args().skip(1));

    let report = serde_json::json!({
        "values": program.values(),
        "args": parsed.args,
        "unknown": parsed.unknown,
    });
    println!("{}", report);
}
