//! Blackboard - raw key/value parameters attached to a talent, skill or module
//!
//! Keys are stored lowercase and keep their insertion order. Game data ships
//! blackboards as plain `[{key, value}]` arrays; module blackboards also carry
//! nested views (`trait`, `talent`) that the module overlay can swap in.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One `{key, value, valueStr}` parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlackboardEntry {
    pub key: String,
    #[serde(default)]
    pub value: f64,
    #[serde(default, rename = "valueStr", skip_serializing_if = "Option::is_none")]
    pub value_str: Option<String>,
}

impl BlackboardEntry {
    pub fn new(key: &str, value: f64) -> Self {
        BlackboardEntry {
            key: key.to_ascii_lowercase(),
            value,
            value_str: None,
        }
    }
}

/// Ordered parameter set for one buff source
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "BlackboardRepr")]
pub struct Blackboard {
    entries: Vec<BlackboardEntry>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    views: BTreeMap<String, Blackboard>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BlackboardRepr {
    List(Vec<BlackboardEntry>),
    Full {
        #[serde(default)]
        entries: Vec<BlackboardEntry>,
        #[serde(default)]
        views: BTreeMap<String, Blackboard>,
    },
}

impl From<BlackboardRepr> for Blackboard {
    fn from(repr: BlackboardRepr) -> Self {
        let (entries, views) = match repr {
            BlackboardRepr::List(entries) => (entries, BTreeMap::new()),
            BlackboardRepr::Full { entries, views } => (entries, views),
        };
        let mut bb = Blackboard {
            entries: Vec::with_capacity(entries.len()),
            views,
        };
        for entry in entries {
            let key = entry.key.to_ascii_lowercase();
            bb.set(&key, entry.value);
            if let Some(text) = entry.value_str {
                bb.set_text(&key, text);
            }
        }
        bb
    }
}

impl Blackboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(key, value)` pairs
    pub fn from_pairs(pairs: &[(&str, f64)]) -> Self {
        let mut bb = Blackboard::new();
        for (key, value) in pairs {
            bb.set(key, *value);
        }
        bb
    }

    /// Builder-style insert
    pub fn with(mut self, key: &str, value: f64) -> Self {
        self.set(key, value);
        self
    }

    /// Attach a nested view (e.g. a module's `trait` or `talent` parameters)
    pub fn with_view(mut self, name: &str, view: Blackboard) -> Self {
        self.views.insert(name.to_string(), view);
        self
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.entries.iter().find(|e| e.key == key).map(|e| e.value)
    }

    /// Value of `key`, zero when absent
    pub fn value(&self, key: &str) -> f64 {
        self.get(key).unwrap_or(0.0)
    }

    pub fn value_or(&self, key: &str, default: f64) -> f64 {
        self.get(key).unwrap_or(default)
    }

    /// String payload of `key`, if any
    pub fn text(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.key == key)
            .and_then(|e| e.value_str.as_deref())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|e| e.key == key)
    }

    /// Insert or overwrite, keeping the original position of an existing key
    pub fn set(&mut self, key: &str, value: f64) {
        let key = key.to_ascii_lowercase();
        if let Some(entry) = self.entries.iter_mut().find(|e| e.key == key) {
            entry.value = value;
        } else {
            self.entries.push(BlackboardEntry {
                key,
                value,
                value_str: None,
            });
        }
    }

    fn set_text(&mut self, key: &str, text: String) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.key == key) {
            entry.value_str = Some(text);
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<f64> {
        let pos = self.entries.iter().position(|e| e.key == key)?;
        Some(self.entries.remove(pos).value)
    }

    /// Move the value of `from` to `to`; no-op when `from` is absent
    pub fn rename(&mut self, from: &str, to: &str) {
        if let Some(value) = self.remove(from) {
            self.set(to, value);
        }
    }

    /// Multiply `key` in place; no-op when absent
    pub fn scale(&mut self, key: &str, factor: f64) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.key == key) {
            entry.value *= factor;
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &BlackboardEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn view(&self, name: &str) -> Option<&Blackboard> {
        self.views.get(name)
    }

    /// Replace the entries with those of view `name`; the views stay attached
    /// so a second view can still be merged on top. False when absent.
    pub fn substitute_view(&mut self, name: &str) -> bool {
        match self.views.get(name) {
            Some(view) => {
                self.entries = view.entries.clone();
                true
            }
            None => false,
        }
    }

    pub fn has_views(&self) -> bool {
        !self.views.is_empty()
    }

    /// Copy every entry of `other` over this blackboard
    pub fn merge(&mut self, other: &Blackboard) {
        for entry in &other.entries {
            self.set(&entry.key, entry.value);
            if let Some(text) = &entry.value_str {
                self.set_text(&entry.key, text.clone());
            }
        }
    }
}
