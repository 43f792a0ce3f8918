use thiserror::Error;

/// Unified error type for git-tag-bump operations
#[derive(Error, Debug)]
pub enum TagBumpError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Tag error: {0}")]
    Tag(String),

    #[error("Repository operation failed: {0}")]
    Repository(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-tag-bump
pub type Result<T> = std::result::Result<T, TagBumpError>;

impl TagBumpError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        TagBumpError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        TagBumpError::Version(msg.into())
    }

    /// Create a tag error with context
    pub fn tag(msg: impl Into<String>) -> Self {
        TagBumpError::Tag(msg.into())
    }

    /// Create a repository error with context
    pub fn repository(msg: impl Into<String>) -> Self {
        TagBumpError::Repository(msg.into())
    }
}

impl From<toml::de::Error> for TagBumpError {
    fn from(err: toml::de::Error) -> Self {
        TagBumpError::Config(err.to_string())
    }
}
