//! Custom release rule expansion and merging with the changelog rule table.
//!
//! The classifier that consumes these rules evaluates custom rules before the
//! defaults and stops at the first match. A custom `fix:patch` rule would
//! therefore also swallow breaking fixes and report them as patches. Each
//! custom rule is expanded into a `breaking` rule releasing `major` followed
//! by the rule as written, so breaking commits still hit the major rule
//! first.

use crate::diagnostic::{Diagnostic, DiagnosticSink};
use crate::domain::{CustomReleaseRule, ReleaseRule, ReleaseType};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

const RULE_SEPARATOR: char = ',';
const PART_SEPARATOR: char = ':';

/// Changelog rules keyed by commit type, in table order
///
/// In configuration files the table is written as
/// `[changelog_rules.<type>]` with `release` and an optional `section`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "IndexMap<String, TableEntry>",
    into = "IndexMap<String, TableEntry>"
)]
pub struct ChangelogRules {
    rules: IndexMap<String, ReleaseRule>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TableEntry {
    release: ReleaseType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    section: Option<String>,
}

impl From<IndexMap<String, TableEntry>> for ChangelogRules {
    fn from(entries: IndexMap<String, TableEntry>) -> Self {
        ChangelogRules::from_rules(entries.into_iter().map(|(commit_type, entry)| {
            ReleaseRule::new(
                commit_type.to_lowercase(),
                entry.release,
                entry.section.as_deref(),
            )
        }))
    }
}

impl From<ChangelogRules> for IndexMap<String, TableEntry> {
    fn from(table: ChangelogRules) -> Self {
        table
            .rules
            .into_iter()
            .map(|(commit_type, rule)| {
                let entry = TableEntry {
                    release: rule.release,
                    section: rule.section,
                };
                (commit_type, entry)
            })
            .collect()
    }
}

impl Default for ChangelogRules {
    fn default() -> Self {
        ChangelogRules::from_rules([
            ReleaseRule::new("feat", ReleaseType::Minor, Some("Features")),
            ReleaseRule::new("fix", ReleaseType::Patch, Some("Bug Fixes")),
            ReleaseRule::new("perf", ReleaseType::Patch, Some("Performance Improvements")),
            ReleaseRule::new("revert", ReleaseType::Patch, Some("Reverts")),
            ReleaseRule::new("docs", ReleaseType::Patch, Some("Documentation")),
            ReleaseRule::new("style", ReleaseType::Patch, Some("Styles")),
            ReleaseRule::new("refactor", ReleaseType::Patch, Some("Code Refactoring")),
            ReleaseRule::new("test", ReleaseType::Patch, Some("Tests")),
            ReleaseRule::new("build", ReleaseType::Patch, Some("Build Systems")),
            ReleaseRule::new("ci", ReleaseType::Patch, Some("Continuous Integration")),
        ])
    }
}

impl ChangelogRules {
    /// Build a table from rules; a later rule replaces an earlier one of the
    /// same type but keeps its position
    pub fn from_rules(rules: impl IntoIterator<Item = ReleaseRule>) -> Self {
        let mut table = IndexMap::new();
        for rule in rules {
            table.insert(rule.r#type.clone(), rule);
        }
        ChangelogRules { rules: table }
    }

    /// Rule for a commit type, compared case-insensitively
    pub fn get(&self, commit_type: &str) -> Option<&ReleaseRule> {
        self.rules.get(&commit_type.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReleaseRule> {
        self.rules.values()
    }

    fn default_section(&self, commit_type: &str) -> Option<String> {
        self.get(commit_type).and_then(|rule| rule.section.clone())
    }

    /// Parse `type:release[:section],...` into expanded release rules
    ///
    /// Malformed rules and unknown release types are reported as warnings and
    /// skipped. Every accepted rule becomes two rules sharing its type and
    /// section: `{release: major, breaking: true}` first, then the rule as
    /// written with `breaking: false`.
    pub fn map_custom_release_rules(
        &self,
        custom_release_rules: &str,
        sink: &dyn DiagnosticSink,
    ) -> Vec<ReleaseRule> {
        custom_release_rules
            .split(RULE_SEPARATOR)
            .filter_map(|definition| self.parse_custom_rule(definition, sink))
            .flat_map(|(custom, release)| {
                let section = custom
                    .section
                    .clone()
                    .filter(|s| !s.is_empty())
                    .or_else(|| self.default_section(&custom.r#type));

                [
                    ReleaseRule {
                        r#type: custom.r#type.clone(),
                        release: ReleaseType::Major,
                        section: section.clone(),
                        breaking: Some(true),
                    },
                    ReleaseRule {
                        r#type: custom.r#type,
                        release,
                        section,
                        breaking: Some(false),
                    },
                ]
            })
            .collect()
    }

    fn parse_custom_rule(
        &self,
        definition: &str,
        sink: &dyn DiagnosticSink,
    ) -> Option<(CustomReleaseRule, ReleaseType)> {
        let parts: Vec<&str> = definition.split(PART_SEPARATOR).collect();
        if parts.len() < 2 {
            sink.report(Diagnostic::MalformedRule {
                rule: definition.to_string(),
            });
            return None;
        }

        let custom = CustomReleaseRule {
            r#type: parts[0].to_string(),
            release: parts[1].to_string(),
            section: parts.get(2).map(|s| s.to_string()),
        };

        if parts.len() == 2 {
            sink.report(Diagnostic::MissingSection {
                rule: definition.to_string(),
                default_section: self.default_section(&custom.r#type),
            });
        }

        match custom.release.parse::<ReleaseType>() {
            Ok(release) => Some((custom, release)),
            Err(_) => {
                sink.report(Diagnostic::UnknownReleaseType {
                    rule: definition.to_string(),
                    release: custom.release,
                });
                None
            }
        }
    }

    /// Overlay `mapped` rules on this table and keep the changelog-eligible ones
    ///
    /// Rules are keyed by their exact type and the last one written for a type
    /// wins, so of an expanded pair only the literal rule survives. Types
    /// already in the table keep their position; new ones are appended in the
    /// order first seen. Rules without a section are dropped from the result.
    pub fn merge(&self, mapped: &[ReleaseRule]) -> Vec<ReleaseRule> {
        let mut merged = self.rules.clone();
        for rule in mapped {
            merged.insert(rule.r#type.clone(), rule.clone());
        }

        merged
            .into_values()
            .filter(ReleaseRule::has_section)
            .collect()
    }
}
