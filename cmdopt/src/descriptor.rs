//! Parsing of option flag strings such as `"-c, --cheese [type]"`.

use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Plain flag, consumes nothing.
    None,
    /// `[value]`: consumes the next token unless it looks like a flag.
    Optional,
    /// `<value>`: always consumes the next token.
    Required,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionDescriptor {
    flags: String,
    short: Option<String>,
    long: String,
    arity: Arity,
    negate: bool,
    attribute: String,
}

impl OptionDescriptor {
    pub fn parse(flags: &str) -> Result<Self> {
        let arity = if flags.contains('<') {
            Arity::Required
        } else if flags.contains('[') {
            Arity::Optional
        } else {
            Arity::None
        };

        let mut tokens = split_flags(flags);
        let short = if tokens.len() > 1 && !is_arity_marker(tokens[1]) {
            Some(tokens.remove(0).to_string())
        } else {
            None
        };
        let long = match tokens.first() {
            Some(t) if t.starts_with('-') && t.len() > 1 => t.to_string(),
            _ => return Err(Error::MalformedOption(flags.to_string())),
        };
        if short.as_deref().is_some_and(|s| !s.starts_with('-')) {
            return Err(Error::MalformedOption(flags.to_string()));
        }

        let negate = has_negation(flags);
        let name = long.trim_start_matches('-');
        let name = if negate {
            name.strip_prefix("no-").unwrap_or(name)
        } else {
            name
        };

        Ok(OptionDescriptor {
            flags: flags.to_string(),
            short,
            attribute: camelcase(name),
            long,
            arity,
            negate,
        })
    }

    /// The flags string exactly as registered.
    pub fn flags(&self) -> &str {
        &self.flags
    }

    pub fn short(&self) -> Option<&str> {
        self.short.as_deref()
    }

    pub fn long(&self) -> &str {
        &self.long
    }

    pub fn arity(&self) -> Arity {
        self.arity
    }

    pub fn takes_value(&self) -> bool {
        self.arity != Arity::None
    }

    pub fn is_negation(&self) -> bool {
        self.negate
    }

    /// Key under which the resolved value is stored.
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// Exact match against either flag.
    pub fn is(&self, token: &str) -> bool {
        self.long == token || self.short.as_deref() == Some(token)
    }
}

pub(crate) fn is_separator(c: char) -> bool {
    c == ' ' || c == ',' || c == '|'
}

pub(crate) fn split_flags(flags: &str) -> Vec<&str> {
    flags.split(is_separator).filter(|t| !t.is_empty()).collect()
}

fn is_arity_marker(token: &str) -> bool {
    token.starts_with('<') || token.starts_with('[')
}

/// `--no-` at the start of the string or right after a separator.
fn has_negation(flags: &str) -> bool {
    flags.match_indices("--no-").any(|(pos, _)| {
        pos == 0 || flags[..pos].chars().next_back().is_some_and(is_separator)
    })
}

fn camelcase(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for (i, word) in name.split('-').filter(|w| !w.is_empty()).enumerate() {
        if i == 0 {
            out.push_str(word);
            continue;
        }
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}
