//! The token-matching loop over a normalized argv.

use crate::descriptor::Arity;
use crate::registry::Registry;
use crate::{Error, Result};

/// Returned by the dispatch callback after each matched option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    Continue,
    Halt,
}

#[derive(Debug, Default)]
pub(crate) struct Scan {
    pub args: Vec<String>,
    pub unknown: Vec<String>,
    pub halted: bool,
}

/// A token beginning with a dash, longer than the bare `-`.
pub(crate) fn looks_like_flag(token: &str) -> bool {
    token.len() > 1 && token.starts_with('-')
}

/// Walk `tokens`, calling `dispatch(option_index, raw_value)` for every
/// registered option in command-line order.
pub(crate) fn scan<F>(tokens: &[String], registry: &Registry, mut dispatch: F) -> Result<Scan>
where
    F: FnMut(usize, Option<&str>) -> Result<Flow>,
{
    let mut out = Scan::default();
    let mut literal = false;
    let mut i = 0;

    while i < tokens.len() {
        let arg = &tokens[i];
        i += 1;

        if literal {
            out.args.push(arg.clone());
            continue;
        }
        if arg == "--" {
            literal = true;
            continue;
        }

        if let Some(idx) = registry.find(arg) {
            let desc = &registry.get(idx).descriptor;
            let value = match desc.arity() {
                Arity::Required => match tokens.get(i) {
                    Some(v) => {
                        i += 1;
                        Some(v.as_str())
                    }
                    None => {
                        return Err(Error::MissingArgument {
                            flags: desc.flags().to_string(),
                        })
                    }
                },
                Arity::Optional => match tokens.get(i) {
                    Some(v) if !looks_like_flag(v) => {
                        i += 1;
                        Some(v.as_str())
                    }
                    _ => None,
                },
                Arity::None => None,
            };
            tracing::debug!(option = desc.long(), ?value, "matched option");
            if dispatch(idx, value)? == Flow::Halt {
                out.halted = true;
                return Ok(out);
            }
            continue;
        }

        if looks_like_flag(arg) {
            tracing::debug!(token = %arg, "unknown option");
            out.unknown.push(arg.clone());
            if let Some(next) = tokens.get(i).filter(|t| !looks_like_flag(t)) {
                out.unknown.push(next.clone());
                i += 1;
            }
            continue;
        }

        out.args.push(arg.clone());
    }

    Ok(out)
}
