//! Help text rendering.

use std::fmt::Write;

use crate::descriptor::split_flags;
use crate::registry::OptionEntry;

pub(crate) const DEFAULT_HELP_FLAGS: &str = "-h, --help";
pub(crate) const DEFAULT_HELP_DESCRIPTION: &str = "output usage information";

/// Tokens that trigger help, plus how help lists itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct HelpFlags {
    pub flags: String,
    pub short: Option<String>,
    pub long: Option<String>,
    pub description: String,
}

impl HelpFlags {
    pub fn new(flags: &str, description: &str) -> Self {
        let mut tokens = split_flags(flags).into_iter();
        let first = tokens.next().map(str::to_string);
        let (short, long) = match tokens.next() {
            Some(second) => (first, Some(second.to_string())),
            None => (None, first),
        };
        HelpFlags {
            flags: flags.to_string(),
            short,
            long,
            description: description.to_string(),
        }
    }

    pub fn is(&self, token: &str) -> bool {
        self.short.as_deref() == Some(token) || self.long.as_deref() == Some(token)
    }
}

impl Default for HelpFlags {
    fn default() -> Self {
        HelpFlags::new(DEFAULT_HELP_FLAGS, DEFAULT_HELP_DESCRIPTION)
    }
}

pub(crate) fn render(
    name: &str,
    usage: &str,
    description: Option<&str>,
    entries: &[OptionEntry],
    help: &HelpFlags,
) -> String {
    let width = entries
        .iter()
        .map(|e| e.descriptor.flags().chars().count())
        .chain(std::iter::once(help.flags.chars().count()))
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    let _ = write!(out, "Usage: {} {}\n\n", name, usage);
    if let Some(desc) = description {
        let _ = write!(out, "{}\n\n", desc);
    }
    out.push_str("Options:\n");

    for e in entries {
        let mut text = e.description.clone();
        if !e.descriptor.is_negation() {
            if let Some(ref default) = e.default_value {
                let _ = write!(text, " (default: {})", default.to_json());
            }
        }
        write_row(&mut out, e.descriptor.flags(), &text, width);
    }
    write_row(&mut out, &help.flags, &help.description, width);
    out
}

fn write_row(out: &mut String, flags: &str, text: &str, width: usize) {
    let text = text.trim_start();
    if text.is_empty() {
        let _ = write!(out, "  {}\n", flags);
    } else {
        let _ = write!(out, "  {:width$}  {}\n", flags, text, width = width);
    }
}
