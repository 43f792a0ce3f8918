use crate::error::{Result, TagBumpError};
use regex::Regex;
use serde::Serialize;
use std::borrow::Cow;

/// Commit sha carried by the synthetic baseline tag
pub const SYNTHETIC_SHA: &str = "HEAD";

/// Commit a tag points at
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCommit {
    pub sha: String,
}

/// Represents a git tag as reported by the repository host
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub name: String,
    pub commit: TagCommit,
}

impl Tag {
    /// Create a new tag pointing at `sha`
    pub fn new(name: impl Into<String>, sha: impl Into<String>) -> Self {
        Tag {
            name: name.into(),
            commit: TagCommit { sha: sha.into() },
        }
    }

    /// The `{prefix}0.0.0` tag used when a repository has no stable release yet
    pub fn synthetic(prefix: &TagPrefix) -> Self {
        Tag::new(format!("{}0.0.0", prefix.as_str()), SYNTHETIC_SHA)
    }

    /// Whether this tag was made up by [`Tag::synthetic`] rather than fetched
    pub fn is_synthetic(&self) -> bool {
        self.commit.sha == SYNTHETIC_SHA
    }
}

/// Tag naming prefix (e.g. "v" in "v1.2.3")
///
/// The prefix is compiled into a regex anchored at the start of the tag name,
/// so it may itself contain regex syntax such as `app-(web|api)-`.
#[derive(Debug, Clone)]
pub struct TagPrefix {
    prefix: String,
    regex: Regex,
}

impl TagPrefix {
    /// Compile a tag prefix
    pub fn new(prefix: impl Into<String>) -> Result<Self> {
        let prefix = prefix.into();
        let regex = Regex::new(&format!("^{}", prefix)).map_err(|e| {
            TagBumpError::tag(format!("Invalid tag prefix '{}': {}", prefix, e))
        })?;

        Ok(TagPrefix { prefix, regex })
    }

    /// The prefix as configured
    pub fn as_str(&self) -> &str {
        &self.prefix
    }

    /// Remove the prefix from a tag name (e.g. "v1.2.3" -> "1.2.3")
    pub fn strip<'a>(&self, name: &'a str) -> Cow<'a, str> {
        self.regex.replace(name, "")
    }

    /// Parse the semantic version carried by a tag name
    ///
    /// The prefix is removed when present; names without it are parsed as
    /// they are. Returns `None` when the remainder is not a valid semantic
    /// version.
    pub fn parse_version(&self, name: &str) -> Option<semver::Version> {
        semver::Version::parse(&self.strip(name)).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_new() {
        let tag = Tag::new("v1.2.3", "abc123");
        assert_eq!(tag.name, "v1.2.3");
        assert_eq!(tag.commit.sha, "abc123");
        assert!(!tag.is_synthetic());
    }

    #[test]
    fn test_synthetic_tag() {
        let prefix = TagPrefix::new("v").unwrap();
        let tag = Tag::synthetic(&prefix);
        assert_eq!(tag.name, "v0.0.0");
        assert_eq!(tag.commit.sha, "HEAD");
        assert!(tag.is_synthetic());
    }

    #[test]
    fn test_prefix_strip() {
        let prefix = TagPrefix::new("v").unwrap();
        assert_eq!(prefix.strip("v1.2.3"), "1.2.3");
        assert_eq!(prefix.strip("1.2.3"), "1.2.3");
    }

    #[test]
    fn test_prefix_only_strips_leading_match() {
        let prefix = TagPrefix::new("v").unwrap();
        assert_eq!(prefix.strip("v1.0.0-dev"), "1.0.0-dev");
    }

    #[test]
    fn test_empty_prefix_matches_everything() {
        let prefix = TagPrefix::new("").unwrap();
        assert_eq!(prefix.parse_version("1.2.3"), Some(semver::Version::new(1, 2, 3)));
    }

    #[test]
    fn test_regex_prefix() {
        let prefix = TagPrefix::new("app-(web|api)-").unwrap();
        assert_eq!(prefix.strip("app-web-1.0.0"), "1.0.0");
        assert_eq!(prefix.strip("app-api-2.0.0"), "2.0.0");
        assert_eq!(prefix.strip("app-cli-1.0.0"), "app-cli-1.0.0");
        assert!(prefix.parse_version("app-cli-1.0.0").is_none());
    }

    #[test]
    fn test_parse_version_prefix_is_optional() {
        let prefix = TagPrefix::new("v").unwrap();
        assert_eq!(
            prefix.parse_version("1.2.3"),
            Some(semver::Version::new(1, 2, 3))
        );
        assert_eq!(
            prefix.parse_version("v1.2.3"),
            Some(semver::Version::new(1, 2, 3))
        );
        assert!(prefix.parse_version("v1.2").is_none());
        assert!(prefix.parse_version("release-1.2.3").is_none());
    }

    #[test]
    fn test_invalid_prefix() {
        assert!(TagPrefix::new("v(").is_err());
    }
}
