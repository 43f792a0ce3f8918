use crate::domain::{HostCommit, Tag};
use crate::error::{Result, TagBumpError};
use crate::git::{Repository, TAG_PAGE_SIZE};
use std::sync::Mutex;

/// Mock repository for testing without actual git operations
///
/// Comparisons ignore the requested range and return every added commit;
/// the last requested range is kept for assertions.
pub struct MockRepository {
    tags: Vec<Tag>,
    commits: Vec<HostCommit>,
    failure: Option<String>,
    last_comparison: Mutex<Option<(Option<String>, String)>>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            tags: Vec::new(),
            commits: Vec::new(),
            failure: None,
            last_comparison: Mutex::new(None),
        }
    }

    /// Add a tag
    pub fn add_tag(&mut self, tag: Tag) {
        self.tags.push(tag);
    }

    /// Add a commit to the comparison result
    pub fn add_commit(&mut self, commit: HostCommit) {
        self.commits.push(commit);
    }

    /// Make every call fail with a repository error carrying `message`
    pub fn fail_with(&mut self, message: impl Into<String>) {
        self.failure = Some(message.into());
    }

    /// The `(base, head)` of the most recent comparison
    pub fn last_comparison(&self) -> Option<(Option<String>, String)> {
        self.last_comparison
            .lock()
            .ok()
            .and_then(|last| last.clone())
    }

    fn check_failure(&self) -> Result<()> {
        match &self.failure {
            Some(message) => Err(TagBumpError::repository(message.clone())),
            None => Ok(()),
        }
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn list_tags(&self, fetch_all: bool) -> Result<Vec<Tag>> {
        self.check_failure()?;
        let limit = if fetch_all { usize::MAX } else { TAG_PAGE_SIZE };
        Ok(self.tags.iter().take(limit).cloned().collect())
    }

    fn compare_commits(&self, base: Option<&str>, head: &str) -> Result<Vec<HostCommit>> {
        if let Ok(mut last) = self.last_comparison.lock() {
            *last = Some((base.map(str::to_string), head.to_string()));
        }
        self.check_failure()?;
        Ok(self.commits.clone())
    }
}
