//! `Program`: the option definitions of one command plus the state of its
//! most recent parse.

use std::collections::{HashMap, HashSet};
use std::io::Write;

use crate::engine::{self, Flow};
use crate::help::{self, HelpFlags};
use crate::normalize::normalize;
use crate::registry::{Opt, OptionEntry, Registry, Role};
use crate::resolve::resolve;
use crate::value::{Value, Values};
use crate::{Error, Result};

pub const DEFAULT_VERSION_FLAGS: &str = "-V, --version";
pub const DEFAULT_VERSION_DESCRIPTION: &str = "output the version number";
const DEFAULT_USAGE: &str = "[options]";

/// Result of a parse that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Parsed(ParsedArgs),
    /// A help flag was given; render with [`Program::help_information`].
    Help,
    /// The version flag was given; carries the version string.
    Version(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedArgs {
    /// Positional arguments, in order.
    pub args: Vec<String>,
    /// Unrecognized flags and the values they swallowed. Only ever
    /// non-empty when unknown options are allowed.
    pub unknown: Vec<String>,
}

pub struct Program {
    name: String,
    usage: Option<String>,
    description: Option<String>,
    registry: Registry,
    values: HashMap<String, Value>,
    present: HashSet<String>,
    args: Vec<String>,
    unknown: Vec<String>,
    allow_unknown: bool,
    help: HelpFlags,
    version: Option<String>,
    version_idx: Option<usize>,
}

impl Program {
    pub fn new(name: &str) -> Self {
        Program {
            name: name.to_string(),
            usage: None,
            description: None,
            registry: Registry::default(),
            values: HashMap::new(),
            present: HashSet::new(),
            args: Vec::new(),
            unknown: Vec::new(),
            allow_unknown: false,
            help: HelpFlags::default(),
            version: None,
            version_idx: None,
        }
    }

    pub fn description(mut self, text: &str) -> Self {
        self.description = Some(text.to_string());
        self
    }

    /// Replace the `[options]` part of the usage line.
    pub fn usage(mut self, text: &str) -> Self {
        self.usage = Some(text.to_string());
        self
    }

    /// Register an option.
    ///
    /// # Panics
    ///
    /// If the flags string has no flag in it; that is a bug in the calling
    /// program, not bad user input. See [`Program::try_option`].
    pub fn option(self, opt: Opt) -> Self {
        match self.try_option(opt) {
            Ok(program) => program,
            Err(e) => panic!("{}", e),
        }
    }

    pub fn try_option(mut self, opt: Opt) -> Result<Self> {
        let entry = opt.into_entry(Role::Assign)?;
        self.register(entry);
        Ok(self)
    }

    /// Register `-V, --version`, printing `version` when given.
    pub fn version(self, version: &str) -> Self {
        self.version_with(version, DEFAULT_VERSION_FLAGS, DEFAULT_VERSION_DESCRIPTION)
    }

    /// # Panics
    ///
    /// On a malformed flags string, like [`Program::option`].
    pub fn version_with(mut self, version: &str, flags: &str, description: &str) -> Self {
        let entry = match Opt::new(flags)
            .description(description)
            .into_entry(Role::Version)
        {
            Ok(entry) => entry,
            Err(e) => panic!("{}", e),
        };
        tracing::debug!(flags, "registered version option");
        match self.version_idx {
            Some(idx) => *self.registry.get_mut(idx) = entry,
            None => self.version_idx = Some(self.registry.push(entry)),
        }
        self.version = Some(version.to_string());
        self
    }

    /// Change which flags trigger help. An empty `flags` or `description`
    /// keeps the current one.
    pub fn help_option(mut self, flags: &str, description: &str) -> Self {
        let flags = if flags.is_empty() {
            self.help.flags.clone()
        } else {
            flags.to_string()
        };
        let description = if description.is_empty() {
            self.help.description.clone()
        } else {
            description.to_string()
        };
        self.help = HelpFlags::new(&flags, &description);
        self
    }

    pub fn allow_unknown_option(mut self, enabled: bool) -> Self {
        self.allow_unknown = enabled;
        self
    }

    fn register(&mut self, entry: OptionEntry) {
        let desc = &entry.descriptor;
        let attribute = desc.attribute().to_string();
        let seed = if desc.is_negation() {
            if self.registry.has_positive(&attribute) {
                self.values.get(&attribute).cloned()
            } else {
                Some(entry.default_value.clone().unwrap_or(Value::Bool(true)))
            }
        } else {
            entry.default_value.clone()
        };
        tracing::debug!(flags = desc.flags(), attribute = %attribute, ?seed, "registered option");
        if let Some(v) = seed {
            self.values.insert(attribute, v);
        }
        self.registry.push(entry);
    }

    /// Parse `argv` (without the program name).
    ///
    /// Values assigned by earlier calls are kept unless overwritten;
    /// positional arguments and presence tracking start afresh.
    pub fn parse<I, S>(&mut self, argv: I) -> Result<Outcome>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let argv: Vec<String> = argv.into_iter().map(Into::into).collect();
        self.args.clear();
        self.unknown.clear();
        self.present.clear();

        let tokens = normalize(&argv, &self.registry);
        let registry = &self.registry;
        let values = &mut self.values;
        let present = &mut self.present;

        let scan = engine::scan(&tokens, registry, |idx, raw| {
            let entry = registry.get(idx);
            if entry.role == Role::Version {
                return Ok(Flow::Halt);
            }
            present.insert(entry.descriptor.attribute().to_string());
            for shared in registry.sharing_long(idx) {
                let attribute = shared.descriptor.attribute();
                if let Some(v) = resolve(shared, raw, values.get(attribute))? {
                    tracing::debug!(attribute, value = %v, "assigned");
                    values.insert(attribute.to_string(), v);
                }
            }
            Ok(Flow::Continue)
        })?;

        if scan.halted {
            return Ok(Outcome::Version(self.version.clone().unwrap_or_default()));
        }
        if scan.unknown.iter().any(|t| self.help.is(t)) {
            return Ok(Outcome::Help);
        }
        if let Some(first) = scan.unknown.first() {
            if !self.allow_unknown {
                return Err(Error::UnknownOption(first.clone()));
            }
            tracing::debug!(unknown = ?scan.unknown, "ignoring unknown options");
        }

        self.args = scan.args;
        self.unknown = scan.unknown;
        Ok(Outcome::Parsed(ParsedArgs {
            args: self.args.clone(),
            unknown: self.unknown.clone(),
        }))
    }

    /// Parse the process arguments.
    pub fn parse_env(&mut self) -> Result<Outcome> {
        self.parse(std::env::args().skip(1))
    }

    /// Parse `argv`, printing and exiting for help, version and errors.
    ///
    /// Help and version go to stdout with exit status 0; errors go to
    /// stderr with exit status 1.
    pub fn parse_or_exit<I, S>(&mut self, argv: I) -> ParsedArgs
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        match self.parse(argv) {
            Ok(Outcome::Parsed(parsed)) => parsed,
            Ok(Outcome::Help) => {
                self.output_help();
                std::process::exit(0);
            }
            Ok(Outcome::Version(version)) => {
                let stdout = std::io::stdout();
                let mut out = stdout.lock();
                let _ = write!(out, "{}\n", version);
                let _ = out.flush();
                std::process::exit(0);
            }
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(e.exit_code());
            }
        }
    }

    pub fn help_information(&self) -> String {
        help::render(
            &self.name,
            self.usage.as_deref().unwrap_or(DEFAULT_USAGE),
            self.description.as_deref(),
            self.registry.entries(),
            &self.help,
        )
    }

    pub fn output_help(&self) {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        let _ = write!(out, "{}", self.help_information());
        let _ = out.flush();
    }

    /// Snapshot of all resolved values, keyed by attribute name.
    ///
    /// The version string, if registered, appears under the attribute of
    /// its flag (`version` by default).
    pub fn values(&self) -> Values {
        let mut map = self.values.clone();
        if let (Some(idx), Some(version)) = (self.version_idx, &self.version) {
            let attribute = self.registry.get(idx).descriptor.attribute();
            map.insert(attribute.to_string(), Value::Str(version.clone()));
        }
        Values::new(self.registry.attributes(), map)
    }

    /// Whether a flag for `attribute` appeared in the last parse.
    pub fn is_present(&self, attribute: &str) -> bool {
        self.present.contains(attribute)
    }

    /// Positional arguments of the last successful parse.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn unknown(&self) -> &[String] {
        &self.unknown
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coerce;

    fn pizza() -> Program {
        Program::new("pizza")
            .option(Opt::new("-p, --pepper").description("add pepper"))
            .option(Opt::new("-P, --pineapple").description("add pineapple"))
            .option(
                Opt::new("-c, --cheese [type]")
                    .description("add the specified type of cheese")
                    .default_val("marble"),
            )
            .option(Opt::new("-C, --no-cheese").description("You do not want any cheese"))
    }

    fn parsed(outcome: Outcome) -> ParsedArgs {
        match outcome {
            Outcome::Parsed(p) => p,
            other => panic!("expected Parsed, got {:?}", other),
        }
    }

    #[test]
    fn defaults_before_parse() {
        let program = pizza();
        let values = program.values();
        assert_eq!(values.get::<String>("cheese").unwrap(), "marble");
        assert!(values.value("pepper").is_none());
        assert!(values.is_known("pepper"));
    }

    #[test]
    fn flags_and_positionals() {
        let mut program = pizza();
        let p = parsed(program.parse(["-p", "order.txt", "--cheese", "brie"]).unwrap());
        assert_eq!(p.args, vec!["order.txt"]);
        let values = program.values();
        assert!(values.get::<bool>("pepper").unwrap());
        assert_eq!(values.get::<String>("cheese").unwrap(), "brie");
        assert!(values.value("pineapple").is_none());
        assert!(program.is_present("pepper"));
        assert!(!program.is_present("pineapple"));
        assert_eq!(program.args(), ["order.txt"]);
    }

    #[test]
    fn bundled_short_flags_equal_separate() {
        let mut a = pizza();
        let mut b = pizza();
        a.parse(["-pP"]).unwrap();
        b.parse(["-p", "-P"]).unwrap();
        assert_eq!(a.values(), b.values());
        assert!(a.values().get::<bool>("pineapple").unwrap());
    }

    #[test]
    fn equals_form_equals_separate() {
        let mut a = pizza();
        let mut b = pizza();
        a.parse(["--cheese=gouda"]).unwrap();
        b.parse(["--cheese", "gouda"]).unwrap();
        assert_eq!(a.values(), b.values());
    }

    #[test]
    fn last_of_negation_pair_wins() {
        let cases: [(&[&str], Value); 4] = [
            (&["--cheese", "--no-cheese"], Value::Bool(false)),
            (&["--no-cheese", "--cheese"], Value::Str("marble".into())),
            (&["-C", "-c", "-C"], Value::Bool(false)),
            (&[], Value::Str("marble".into())),
        ];
        for (argv, expected) in cases {
            let mut program = pizza();
            program.parse(argv.iter().copied()).unwrap();
            assert_eq!(program.values().value("cheese"), Some(&expected), "{:?}", argv);
        }
    }

    #[test]
    fn boolean_pair_without_default() {
        let make = || {
            Program::new("t")
                .option(Opt::new("--sauce"))
                .option(Opt::new("--no-sauce"))
        };
        let mut program = make();
        program.parse(["--no-sauce", "--sauce"]).unwrap();
        assert_eq!(program.values().value("sauce"), Some(&Value::Bool(true)));

        let mut program = make();
        program.parse(["--sauce", "--no-sauce"]).unwrap();
        assert_eq!(program.values().value("sauce"), Some(&Value::Bool(false)));

        let mut program = make();
        program.parse(Vec::<String>::new()).unwrap();
        assert_eq!(program.values().value("sauce"), None);
    }

    #[test]
    fn lone_negation_defaults_true() {
        let mut program = Program::new("t").option(Opt::new("--no-color"));
        assert_eq!(program.values().value("color"), Some(&Value::Bool(true)));
        program.parse(["--no-color"]).unwrap();
        assert_eq!(program.values().value("color"), Some(&Value::Bool(false)));
    }

    #[test]
    fn enable_notifications_is_not_negation() {
        let mut program = Program::new("t").option(Opt::new("--enable-notifications"));
        assert!(program.values().value("enableNotifications").is_none());
        program.parse(["--enable-notifications"]).unwrap();
        assert_eq!(
            program.values().value("enableNotifications"),
            Some(&Value::Bool(true))
        );
        assert!(!program.values().is_known("ableNotifications"));
    }

    #[test]
    fn double_dash_makes_everything_positional() {
        let mut program = pizza();
        let p = parsed(program.parse(["-p", "--", "-P", "--cheese", "x"]).unwrap());
        assert_eq!(p.args, vec!["-P", "--cheese", "x"]);
        assert!(program.values().value("pineapple").is_none());
    }

    #[test]
    fn required_value() {
        let mut program = Program::new("t").option(Opt::new("-x, --xxx <v>"));
        program.parse(["--xxx", "val"]).unwrap();
        assert_eq!(program.values().get::<String>("xxx").unwrap(), "val");

        let mut program = Program::new("t").option(Opt::new("-x, --xxx <v>"));
        program.parse(["-xval"]).unwrap();
        assert_eq!(program.values().get::<String>("xxx").unwrap(), "val");
    }

    #[test]
    fn missing_required_argument() {
        let mut program = Program::new("t").option(Opt::new("-k, --known <v>"));
        let err = program.parse(["--known"]).unwrap_err();
        assert!(matches!(err, Error::MissingArgument { .. }));
        assert_eq!(err.to_string(), "error: option '-k, --known <v>' argument missing");
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn collect_accumulates() {
        let mut program = Program::new("t").option(
            Opt::new("-c, --collect <s>")
                .coerce(coerce::collect)
                .default_val(Vec::<String>::new()),
        );
        program
            .parse(["-c", "foo", "-c", "bar", "-c", "baz"])
            .unwrap();
        assert_eq!(
            program.values().get::<Vec<String>>("collect").unwrap(),
            vec!["foo", "bar", "baz"]
        );
    }

    #[test]
    fn every_option_sharing_a_long_flag_fires() {
        let mut program = Program::new("t")
            .option(Opt::new("-x, --xxx <v>").default_val("a"))
            .option(Opt::new("--xxx <v>").coerce(coerce::int));
        program.parse(["--xxx", "5"]).unwrap();
        assert_eq!(program.values().value("xxx"), Some(&Value::Int(5)));

        let mut program = Program::new("t")
            .option(Opt::new("-x, --xxx <v>").default_val("a"))
            .option(Opt::new("--xxx <v>").coerce(coerce::int));
        program.parse(["-x", "7"]).unwrap();
        assert_eq!(program.values().value("xxx"), Some(&Value::Int(7)));
    }

    #[test]
    fn shared_long_flag_coercion_failure_aborts() {
        let mut program = Program::new("t")
            .option(Opt::new("-x, --xxx <v>"))
            .option(Opt::new("--xxx <v>").coerce(coerce::int));
        let err = program.parse(["--xxx", "five"]).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }));
    }

    #[test]
    fn repeated_without_coercion_overwrites() {
        let mut program = Program::new("t").option(Opt::new("-n, --name <n>"));
        program.parse(["-n", "a", "-n", "b"]).unwrap();
        assert_eq!(program.values().get::<String>("name").unwrap(), "b");
    }

    #[test]
    fn counter_coercion() {
        let mut program = Program::new("t").option(
            Opt::new("-v, --verbose")
                .coerce(coerce::increase)
                .default_val(0),
        );
        program.parse(["-vvv", "--verbose"]).unwrap();
        assert_eq!(program.values().get::<i64>("verbose").unwrap(), 4);
    }

    #[test]
    fn invalid_coercion_aborts() {
        let mut program =
            Program::new("t").option(Opt::new("-i, --integer <n>").coerce(coerce::int));
        let err = program.parse(["-i", "ten"]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "error: option '-i, --integer <n>' argument 'ten' is invalid: not an integer"
        );
    }

    #[test]
    fn unknown_option_is_error() {
        let mut program = pizza();
        let err = program.parse(["--mystery=42"]).unwrap_err();
        assert_eq!(err.to_string(), "error: unknown option '--mystery'");
    }

    #[test]
    fn unknown_option_allowed() {
        let mut program = pizza().allow_unknown_option(true);
        let p = parsed(program.parse(["--mystery=42", "file", "-p"]).unwrap());
        assert_eq!(p.args, vec!["file"]);
        assert_eq!(p.unknown, vec!["--mystery", "42"]);
        assert!(!program.values().is_known("mystery"));
        assert!(program.values().value("mystery").is_none());
        assert!(program.values().get::<bool>("pepper").unwrap());
    }

    #[test]
    fn version_default_flags() {
        let mut program = pizza().version("1.2.3");
        assert_eq!(
            program.parse(["-V"]).unwrap(),
            Outcome::Version("1.2.3".to_string())
        );
        assert_eq!(program.values().get::<String>("version").unwrap(), "1.2.3");
    }

    #[test]
    fn version_short_only_override() {
        let mut program = Program::new("t").version_with("0.0.1", "-v", "show version");
        assert_eq!(
            program.parse(["-v"]).unwrap(),
            Outcome::Version("0.0.1".to_string())
        );
        assert_eq!(program.values().get::<String>("v").unwrap(), "0.0.1");
    }

    #[test]
    fn version_long_override_key() {
        let program = Program::new("t").version_with("2.0.0", "-i, --version-info", "info");
        assert_eq!(
            program.values().get::<String>("versionInfo").unwrap(),
            "2.0.0"
        );
    }

    #[test]
    fn version_halts_before_later_errors() {
        let mut program = pizza().version("1.0.0");
        assert_eq!(
            program.parse(["-V", "--mystery"]).unwrap(),
            Outcome::Version("1.0.0".to_string())
        );
    }

    #[test]
    fn help_default_and_bundled() {
        let mut program = pizza();
        assert_eq!(program.parse(["--help"]).unwrap(), Outcome::Help);
        assert_eq!(program.parse(["-ph"]).unwrap(), Outcome::Help);
    }

    #[test]
    fn help_wins_over_unknown() {
        let mut program = pizza();
        assert_eq!(program.parse(["--mystery", "-h"]).unwrap(), Outcome::Help);
    }

    #[test]
    fn help_override_replaces_triggers() {
        let mut program = pizza().help_option("-e, --HELP", "custom help");
        assert_eq!(program.parse(["--HELP"]).unwrap(), Outcome::Help);
        assert!(program.parse(["--help"]).is_err());
        assert!(program
            .help_information()
            .ends_with("  -e, --HELP           custom help\n"));
    }

    #[test]
    fn help_override_keeps_description() {
        let mut program = Program::new("t").help_option("-?, --assist", "");
        assert_eq!(program.parse(["--assist"]).unwrap(), Outcome::Help);
        assert!(program
            .help_information()
            .ends_with("  -?, --assist  output usage information\n"));

        let program = Program::new("t").help_option("", "show this");
        assert!(program
            .help_information()
            .ends_with("  -h, --help  show this\n"));
    }

    #[test]
    fn help_text() {
        let program = pizza().version("0.0.1").description("Make a pizza");
        assert_eq!(
            program.help_information(),
            "Usage: pizza [options]\n\
             \n\
             Make a pizza\n\
             \n\
             Options:\n  \
             -p, --pepper         add pepper\n  \
             -P, --pineapple      add pineapple\n  \
             -c, --cheese [type]  add the specified type of cheese (default: \"marble\")\n  \
             -C, --no-cheese      You do not want any cheese\n  \
             -V, --version        output the version number\n  \
             -h, --help           output usage information\n"
        );
    }

    #[test]
    fn reparse_resets_args_keeps_values() {
        let mut program = pizza();
        program.parse(["-p", "one"]).unwrap();
        let p = parsed(program.parse(["two"]).unwrap());
        assert_eq!(p.args, vec!["two"]);
        assert!(program.values().get::<bool>("pepper").unwrap());
        assert!(!program.is_present("pepper"));
    }

    #[test]
    fn try_option_rejects_malformed() {
        let result = Program::new("t").try_option(Opt::new("pepper"));
        assert!(matches!(result, Err(Error::MalformedOption(_))));
    }

    #[test]
    #[should_panic(expected = "malformed option definition")]
    fn option_panics_on_malformed() {
        let _ = Program::new("t").option(Opt::new("<path>"));
    }
}
