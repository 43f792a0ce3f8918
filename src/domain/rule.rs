//! Release types and release rules handed to the commit classifier

use crate::error::{Result, TagBumpError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Release type vocabulary understood by the commit classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseType {
    Major,
    Premajor,
    Minor,
    Preminor,
    Patch,
    Prepatch,
    Prerelease,
}

impl ReleaseType {
    /// Every accepted release type, in the classifier's order
    pub const ALL: [ReleaseType; 7] = [
        ReleaseType::Major,
        ReleaseType::Premajor,
        ReleaseType::Minor,
        ReleaseType::Preminor,
        ReleaseType::Patch,
        ReleaseType::Prepatch,
        ReleaseType::Prerelease,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReleaseType::Major => "major",
            ReleaseType::Premajor => "premajor",
            ReleaseType::Minor => "minor",
            ReleaseType::Preminor => "preminor",
            ReleaseType::Patch => "patch",
            ReleaseType::Prepatch => "prepatch",
            ReleaseType::Prerelease => "prerelease",
        }
    }
}

impl FromStr for ReleaseType {
    type Err = TagBumpError;

    /// Matching is exact: "Major" is not a release type.
    fn from_str(s: &str) -> Result<Self> {
        ReleaseType::ALL
            .iter()
            .find(|release| release.as_str() == s)
            .copied()
            .ok_or_else(|| TagBumpError::version(format!("Unknown release type: '{}'", s)))
    }
}

impl fmt::Display for ReleaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A rule mapping a commit type to a release type and changelog section
///
/// Entries of the default table leave `breaking` unset; rules expanded from
/// custom definitions always set it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseRule {
    #[serde(rename = "type")]
    pub r#type: String,
    pub release: ReleaseType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breaking: Option<bool>,
}

impl ReleaseRule {
    /// Create a default-table style rule without a `breaking` flag
    pub fn new(r#type: impl Into<String>, release: ReleaseType, section: Option<&str>) -> Self {
        ReleaseRule {
            r#type: r#type.into(),
            release,
            section: section.map(str::to_string),
            breaking: None,
        }
    }

    /// Whether commits matching this rule are listed in the changelog
    pub fn has_section(&self) -> bool {
        self.section.as_deref().is_some_and(|s| !s.is_empty())
    }
}

/// A custom rule as written by the user: `type:release[:section]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomReleaseRule {
    pub r#type: String,
    pub release: String,
    pub section: Option<String>,
}
