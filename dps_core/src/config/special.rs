//! Special-tag table - per-identifier property lookup
//!
//! Answers "does talent/skill/unit X carry property P, and with what value?".
//! Lookups are total: an unknown identifier or tag is `None`, which every
//! caller reads as "default behavior applies".

use super::{load_toml, parse_toml, ConfigError};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

const EMBEDDED_TAGS: &str = include_str!("../../config/special_tags.toml");

static DEFAULT_TAGS: Lazy<SpecialTags> = Lazy::new(|| match SpecialTags::from_toml(EMBEDDED_TAGS) {
    Ok(tags) => tags,
    Err(e) => {
        tracing::warn!("embedded special-tag table failed to parse: {}", e);
        SpecialTags::default()
    }
});

/// Value attached to a tag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagValue {
    Flag(bool),
    Number(f64),
    Text(String),
    List(Vec<f64>),
}

impl TagValue {
    /// Truthiness: `false`, `0` and empty values are off
    pub fn is_set(&self) -> bool {
        match self {
            TagValue::Flag(b) => *b,
            TagValue::Number(n) => *n != 0.0,
            TagValue::Text(s) => !s.is_empty(),
            TagValue::List(v) => !v.is_empty(),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            TagValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            TagValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[f64]> {
        match self {
            TagValue::List(v) => Some(v.as_slice()),
            _ => None,
        }
    }
}

/// Identifier -> tag -> value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpecialTags {
    table: HashMap<String, HashMap<String, TagValue>>,
}

impl SpecialTags {
    /// The table shipped with the crate
    pub fn embedded() -> &'static SpecialTags {
        &DEFAULT_TAGS
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        parse_toml(content)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        load_toml(path)
    }

    pub fn check(&self, id: &str, tag: &str) -> Option<&TagValue> {
        self.table.get(id).and_then(|tags| tags.get(tag))
    }

    pub fn flag(&self, id: &str, tag: &str) -> bool {
        self.check(id, tag).map_or(false, TagValue::is_set)
    }

    pub fn number(&self, id: &str, tag: &str) -> Option<f64> {
        self.check(id, tag).and_then(TagValue::as_number)
    }

    pub fn text(&self, id: &str, tag: &str) -> Option<&str> {
        self.check(id, tag).and_then(TagValue::as_text)
    }

    pub fn list(&self, id: &str, tag: &str) -> Option<&[f64]> {
        self.check(id, tag).and_then(TagValue::as_list)
    }

    pub fn insert(&mut self, id: &str, tag: &str, value: TagValue) {
        self.table
            .entry(id.to_string())
            .or_default()
            .insert(tag.to_string(), value);
    }

    /// Overlay every entry of `other` onto this table
    pub fn merge(&mut self, other: SpecialTags) {
        for (id, tags) in other.table {
            self.table.entry(id).or_default().extend(tags);
        }
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
