//! Canonical catalog model

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One named base value, e.g. `hp = 45`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Stat {
    pub name: String,
    pub value: u32,
}

impl Stat {
    pub fn new(name: impl Into<String>, value: u32) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// A normalized catalog entry. Never mutated after normalization.
///
/// `height` and `weight` stay in the service's tenths; `stats` keep the
/// order they arrived in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Entity {
    pub id: u32,
    pub name: String,
    pub image_url: String,
    pub types: Vec<String>,
    pub height: u32,
    pub weight: u32,
    pub stats: Vec<Stat>,
}

impl Entity {
    pub fn has_image(&self) -> bool {
        !self.image_url.is_empty()
    }

    pub fn stat(&self, name: &str) -> Option<&Stat> {
        self.stats
            .iter()
            .find(|stat| stat.name.eq_ignore_ascii_case(name))
    }

    pub fn matches(&self, needle_lower: &str) -> bool {
        needle_lower.is_empty() || self.name.to_lowercase().contains(needle_lower)
    }
}
