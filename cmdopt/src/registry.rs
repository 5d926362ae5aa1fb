//! Option builder and the ordered registry of a program's options.

use std::sync::Arc;

use crate::coerce::CoerceFn;
use crate::descriptor::OptionDescriptor;
use crate::value::{IntoValue, Value};
use crate::Result;

// ============================================================================
// Opt — option builder
// ============================================================================

pub struct Opt {
    flags: String,
    description: Option<String>,
    default_value: Option<Value>,
    coerce: Option<CoerceFn>,
}

impl Opt {
    pub fn new(flags: &str) -> Self {
        Opt {
            flags: flags.to_string(),
            description: None,
            default_value: None,
            coerce: None,
        }
    }

    pub fn description(mut self, desc: &str) -> Self {
        self.description = Some(desc.to_string());
        self
    }

    pub fn default_val<T: IntoValue>(mut self, v: T) -> Self {
        self.default_value = Some(v.into_value());
        self
    }

    /// Coerce raw values through `f`, which also sees the previous value.
    pub fn coerce<F>(mut self, f: F) -> Self
    where
        F: Fn(Option<&str>, Option<&Value>) -> std::result::Result<Value, String>
            + Send
            + Sync
            + 'static,
    {
        self.coerce = Some(Arc::new(f));
        self
    }

    pub fn coerce_with(mut self, f: CoerceFn) -> Self {
        self.coerce = Some(f);
        self
    }

    pub(crate) fn into_entry(self, role: Role) -> Result<OptionEntry> {
        Ok(OptionEntry {
            descriptor: OptionDescriptor::parse(&self.flags)?,
            description: self.description.unwrap_or_default(),
            default_value: self.default_value,
            coerce: self.coerce,
            role,
        })
    }
}

// ============================================================================
// Registry
// ============================================================================

/// What happens when an option matches: plain assignment, or the
/// auto-registered version flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Role {
    Assign,
    Version,
}

#[derive(Clone)]
pub(crate) struct OptionEntry {
    pub descriptor: OptionDescriptor,
    pub description: String,
    pub default_value: Option<Value>,
    pub coerce: Option<CoerceFn>,
    pub role: Role,
}

#[derive(Clone, Default)]
pub(crate) struct Registry {
    entries: Vec<OptionEntry>,
}

impl Registry {
    pub fn push(&mut self, entry: OptionEntry) -> usize {
        self.entries.push(entry);
        self.entries.len() - 1
    }

    pub fn get(&self, idx: usize) -> &OptionEntry {
        &self.entries[idx]
    }

    pub fn get_mut(&mut self, idx: usize) -> &mut OptionEntry {
        &mut self.entries[idx]
    }

    pub fn entries(&self) -> &[OptionEntry] {
        &self.entries
    }

    /// First option whose short or long flag is exactly `token`.
    pub fn find(&self, token: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.descriptor.is(token))
    }

    pub fn descriptor_for(&self, token: &str) -> Option<&OptionDescriptor> {
        self.find(token).map(|idx| &self.entries[idx].descriptor)
    }

    /// Assignable entries registered under the same long flag as `idx`,
    /// in registration order. All of them fire when that flag matches.
    pub fn sharing_long(&self, idx: usize) -> impl Iterator<Item = &OptionEntry> {
        let long = self.entries[idx].descriptor.long();
        self.entries
            .iter()
            .filter(move |e| e.role == Role::Assign && e.descriptor.long() == long)
    }

    /// Whether a non-negating option already stores into `attribute`.
    pub fn has_positive(&self, attribute: &str) -> bool {
        self.entries
            .iter()
            .any(|e| !e.descriptor.is_negation() && e.descriptor.attribute() == attribute)
    }

    /// Distinct attribute names in registration order.
    pub fn attributes(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for e in &self.entries {
            let name = e.descriptor.attribute();
            if !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
        names
    }
}
