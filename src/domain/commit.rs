use serde::Serialize;

/// Raw commit as returned by a repository host comparison
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostCommit {
    pub sha: String,
    pub message: Option<String>,
}

impl HostCommit {
    pub fn new(sha: impl Into<String>, message: Option<&str>) -> Self {
        HostCommit {
            sha: sha.into(),
            message: message.map(str::to_string),
        }
    }
}

/// Commit passed on to the classifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Commit {
    pub message: String,
    pub hash: String,
}

impl Commit {
    /// Project a host commit, dropping it when it has no message
    pub fn from_host(commit: HostCommit) -> Option<Self> {
        match commit.message {
            Some(message) if !message.is_empty() => Some(Commit {
                message,
                hash: commit.sha,
            }),
            _ => None,
        }
    }
}
