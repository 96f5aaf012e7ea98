//! Extractor configuration

use crate::error::{ParseError, Result};
use serde::{Deserialize, Serialize};

/// Options for [`crate::Extractor`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    /// Which text part of a `multipart/mixed` message becomes the body
    pub mixed_body_policy: BodyPolicy,
}

impl ExtractOptions {
    /// Load options from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ParseError::Config(e.to_string()))
    }
}

/// Body selection among several text parts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BodyPolicy {
    /// Every text part replaces the previous candidate
    #[default]
    LastWins,

    /// First HTML part, else first plain-text part
    PreferHtml,
}
