//! Trace - explanation log collected during one calculation
//!
//! The engine only appends; callers read the entries afterwards (e.g. to show
//! why a number came out the way it did). Every entry is mirrored to `tracing`
//! at TRACE level.

use serde::{Deserialize, Serialize};

/// One explanation line, grouped by section (buff tag, "duration", "damage", ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceEntry {
    pub section: String,
    pub message: String,
}

/// Ordered sink of [`TraceEntry`] values
#[derive(Debug, Clone)]
pub struct Trace {
    entries: Vec<TraceEntry>,
    enabled: bool,
}

impl Default for Trace {
    fn default() -> Self {
        Self::new()
    }
}

impl Trace {
    /// A recording trace
    pub fn new() -> Self {
        Trace {
            entries: Vec::new(),
            enabled: true,
        }
    }

    /// A trace that drops everything
    pub fn disabled() -> Self {
        Trace {
            entries: Vec::new(),
            enabled: false,
        }
    }

    pub fn write(&mut self, section: &str, message: impl Into<String>) {
        let message = message.into();
        tracing::trace!(section, "{}", message);
        if self.enabled {
            self.entries.push(TraceEntry {
                section: section.to_string(),
                message,
            });
        }
    }

    pub fn entries(&self) -> &[TraceEntry] {
        &self.entries
    }

    /// Entries recorded under `section`
    pub fn section<'a>(&'a self, section: &'a str) -> impl Iterator<Item = &'a TraceEntry> + 'a {
        self.entries.iter().filter(move |e| e.section == section)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<TraceEntry> {
        self.entries
    }
}
