//! Declarative command-line option parsing.
//!
//! Options are declared with commander-style flag strings and parsed into a
//! snapshot of typed values plus the leftover positional arguments:
//! - `Opt::new("-c, --cheese [type]")` declares short/long flags and arity
//!   (`<required>`, `[optional]`, or none); `--no-x` declares a negation
//! - `.default_val()` and `.coerce()` control how values are stored; a
//!   coercion sees the previous value, so it can accumulate
//! - `Program::parse` returns an [`Outcome`] instead of exiting, and
//!   `Program::parse_or_exit` layers the usual print-and-exit behavior on top
//!
//! ```
//! use cmdopt::{coerce, Opt, Outcome, Program};
//!
//! let mut program = Program::new("pizza")
//!     .version("0.0.1")
//!     .option(Opt::new("-p, --pepper").description("add pepper"))
//!     .option(Opt::new("-c, --cheese [type]").default_val("marble"))
//!     .option(Opt::new("-C, --no-cheese"))
//!     .option(
//!         Opt::new("-t, --topping <name>")
//!             .coerce(coerce::collect)
//!             .default_val(Vec::<String>::new()),
//!     );
//!
//! let outcome = program
//!     .parse(["-p", "-t", "ham", "-t", "olive", "large"])
//!     .unwrap();
//! let Outcome::Parsed(parsed) = outcome else { unreachable!() };
//! assert_eq!(parsed.args, vec!["large"]);
//!
//! let values = program.values();
//! assert!(values.get::<bool>("pepper").unwrap());
//! assert_eq!(values.get::<String>("cheese").unwrap(), "marble");
//! assert_eq!(values.get::<Vec<String>>("topping").unwrap(), vec!["ham", "olive"]);
//! ```

pub mod coerce;
mod descriptor;
mod engine;
mod error;
mod help;
mod normalize;
mod program;
mod registry;
mod resolve;
mod value;

pub use coerce::CoerceFn;
pub use descriptor::{Arity, OptionDescriptor};
pub use error::{Error, Result};
pub use program::{
    Outcome, ParsedArgs, Program, DEFAULT_VERSION_DESCRIPTION, DEFAULT_VERSION_FLAGS,
};
pub use registry::Opt;
pub use value::{FromValue, IntoValue, Value, Values};
