//! Rewrite a raw argv into the canonical token stream the parser walks.

use crate::descriptor::Arity;
use crate::registry::Registry;

/// Split bundled short flags and `--name=value`, stopping at a literal `--`.
///
/// A token that follows a registered option requiring a value is passed
/// through untouched, even if it looks like a flag.
pub(crate) fn normalize(args: &[String], registry: &Registry) -> Vec<String> {
    let mut out = Vec::with_capacity(args.len());

    for (i, arg) in args.iter().enumerate() {
        if arg == "--" {
            out.extend(args[i..].iter().cloned());
            break;
        }

        let after_required = i > 0
            && registry
                .descriptor_for(&args[i - 1])
                .is_some_and(|d| d.arity() == Arity::Required);
        if after_required {
            out.push(arg.clone());
            continue;
        }

        if arg.len() > 2 && arg.starts_with('-') && !arg.starts_with("--") {
            let bundle = &arg[1..];
            if let Some(first) = bundle.chars().next() {
                let flag = format!("-{}", first);
                if registry.descriptor_for(&flag).is_some_and(|d| d.takes_value()) {
                    out.push(flag);
                    out.push(bundle[first.len_utf8()..].to_string());
                } else {
                    out.extend(bundle.chars().map(|c| format!("-{}", c)));
                }
                continue;
            }
        }

        if arg.starts_with("--") {
            if let Some(pos) = arg.find('=') {
                out.push(arg[..pos].to_string());
                out.push(arg[pos + 1..].to_string());
                continue;
            }
        }

        out.push(arg.clone());
    }

    tracing::trace!(?out, "normalized argv");
    out
}
