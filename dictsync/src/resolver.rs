//! Decides whether an incoming CSV value replaces the current translation.

use serde::{Deserialize, Serialize};

/// Outcome of comparing an incoming value with the current translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    /// No translation yet, or only whitespace: always written.
    Fill,
    /// Differing non-empty translation replaced because override is enabled.
    Overwrite,
    /// Incoming value equals the current one.
    Unchanged,
    /// Differing non-empty translation kept because override is disabled.
    Kept,
}

impl Resolution {
    pub fn is_accepted(self) -> bool {
        matches!(self, Resolution::Fill | Resolution::Overwrite)
    }
}

/// Pure decision over `(existing, incoming, override_enabled)`.
///
/// Importing identical content is a no-op whatever the override flag says.
pub fn resolve(existing: Option<&str>, incoming: &str, override_enabled: bool) -> Resolution {
    match existing {
        None => Resolution::Fill,
        Some(current) if current.trim().is_empty() => Resolution::Fill,
        Some(current) if current == incoming => Resolution::Unchanged,
        Some(_) if override_enabled => Resolution::Overwrite,
        Some(_) => Resolution::Kept,
    }
}

/// The override setting of one import pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConflictPolicy {
    pub override_existing: bool,
}

impl ConflictPolicy {
    pub fn new(override_existing: bool) -> Self {
        Self { override_existing }
    }

    pub fn resolve(&self, existing: Option<&str>, incoming: &str) -> Resolution {
        resolve(existing, incoming, self.override_existing)
    }
}
