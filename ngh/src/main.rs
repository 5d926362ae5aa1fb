mod arguments;
mod error;
mod logging;

use error::yourfault;

fn main() {
    logging::init();

    let mut program = arguments::build_program();
    let parsed = program.parse_or_exit(std::env::args().skip(1));

    let json = arguments::cmdline(&program, parsed.args)
        .and_then(|cmdline| Ok(serde_json::to_string_pretty(&cmdline)?));
    match json {
        Ok(json) => println!("{}", json),
        Err(e) => yourfault(&e.to_string()),
    }
}
