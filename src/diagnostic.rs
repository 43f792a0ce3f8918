//! Advisory diagnostics raised while filtering tags and expanding rules.
//!
//! None of these stop processing: the offending item is skipped (or kept,
//! for informational diagnostics) and the caller decides where to send them
//! through a [`DiagnosticSink`].

use std::fmt;
use std::sync::Mutex;

/// Severity of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Debug,
    Warning,
}

/// Non-fatal findings reported to a [`DiagnosticSink`]
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// Tag without the prefix or without a valid semantic version
    InvalidTag { tag: String },
    /// Tag accepted into the sorted list
    ValidTag { tag: String },
    /// Custom rule with fewer than two `:`-separated parts
    MalformedRule { rule: String },
    /// Custom rule without a section; the default one applies if it exists
    MissingSection {
        rule: String,
        default_section: Option<String>,
    },
    /// Custom rule naming a release type the classifier does not know
    UnknownReleaseType { rule: String, release: String },
}

impl Diagnostic {
    pub fn level(&self) -> Level {
        match self {
            Diagnostic::InvalidTag { .. }
            | Diagnostic::ValidTag { .. }
            | Diagnostic::MissingSection { .. } => Level::Debug,
            Diagnostic::MalformedRule { .. } | Diagnostic::UnknownReleaseType { .. } => {
                Level::Warning
            }
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::InvalidTag { tag } => write!(f, "Found invalid tag: {}", tag),
            Diagnostic::ValidTag { tag } => write!(f, "Found valid tag: {}", tag),
            Diagnostic::MalformedRule { rule } => {
                write!(f, "'{}' is not a valid custom release definition", rule)
            }
            Diagnostic::MissingSection {
                rule,
                default_section,
            } => {
                write!(f, "'{}' doesn't mention the section for the changelog. ", rule)?;
                match default_section {
                    Some(section) => {
                        write!(f, "Default section ({}) will be used instead", section)
                    }
                    None => write!(
                        f,
                        "The commits matching this rule won't be included in the changelog"
                    ),
                }
            }
            Diagnostic::UnknownReleaseType { rule, release } => {
                write!(f, "'{}' in '{}' is not a valid release type", release, rule)
            }
        }
    }
}

/// Destination for diagnostics
pub trait DiagnosticSink {
    fn report(&self, diagnostic: Diagnostic);
}

/// Forwards diagnostics to `tracing` at their level
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, diagnostic: Diagnostic) {
        match diagnostic.level() {
            Level::Debug => tracing::debug!("{}", diagnostic),
            Level::Warning => tracing::warn!("{}", diagnostic),
        }
    }
}

/// Keeps every diagnostic in memory
#[derive(Debug, Default)]
pub struct RecordingSink {
    recorded: Mutex<Vec<Diagnostic>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything reported so far, in order
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.recorded
            .lock()
            .map(|recorded| recorded.clone())
            .unwrap_or_default()
    }

    /// Only the warnings reported so far
    pub fn warnings(&self) -> Vec<Diagnostic> {
        self.diagnostics()
            .into_iter()
            .filter(|d| d.level() == Level::Warning)
            .collect()
    }
}

impl DiagnosticSink for RecordingSink {
    fn report(&self, diagnostic: Diagnostic) {
        tracing::trace!("recording diagnostic: {}", diagnostic);
        if let Ok(mut recorded) = self.recorded.lock() {
            recorded.push(diagnostic);
        }
    }
}
