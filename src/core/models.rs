//! Core data models for translation

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Source/target language pair, sent as `source|target`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguagePair {
    pub source: String,
    pub target: String,
}

impl LanguagePair {
    /// Pair from source and target language codes
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

impl fmt::Display for LanguagePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.source, self.target)
    }
}

impl FromStr for LanguagePair {
    type Err = String;

    /// Accepts `en|es` or `en-es`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (source, target) = s
            .split_once('|')
            .or_else(|| s.split_once('-'))
            .ok_or_else(|| format!("invalid language pair: {}", s))?;

        let (source, target) = (source.trim(), target.trim());
        if source.is_empty() || target.is_empty() {
            return Err(format!("invalid language pair: {}", s));
        }

        Ok(Self::new(source, target))
    }
}
