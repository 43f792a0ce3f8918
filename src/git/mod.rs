//! Repository host abstraction
//!
//! The release analysis only needs two things from wherever the repository
//! lives: its tags and the commits between two refs. The [Repository] trait
//! captures exactly that so the analysis can run against:
//!
//! - [repository::Git2Repository]: a local repository opened with `git2`
//! - [mock::MockRepository]: canned data for tests
//!
//! Failures from either call are passed through untouched; nothing here
//! retries or wraps them.

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::domain::{HostCommit, Tag};
use crate::error::Result;

/// Number of tags returned when the full tag history is not requested
pub const TAG_PAGE_SIZE: usize = 100;

/// Read access to a repository host
pub trait Repository {
    /// List tags, unsorted and unfiltered
    ///
    /// # Arguments
    /// * `fetch_all` - Return every tag instead of only the first
    ///   [TAG_PAGE_SIZE]
    ///
    /// # Example
    /// ```rust
    /// # use git_tag_bump::git::{MockRepository, Repository};
    /// # use git_tag_bump::domain::Tag;
    /// let mut repo = MockRepository::new();
    /// repo.add_tag(Tag::new("v1.0.0", "abc123"));
    /// let tags = repo.list_tags(true).unwrap();
    /// assert_eq!(tags.len(), 1);
    /// ```
    fn list_tags(&self, fetch_all: bool) -> Result<Vec<Tag>>;

    /// Get commits reachable from `head` but not from `base`
    ///
    /// # Arguments
    /// * `base` - Starting ref (exclusive); `None` walks back to the root
    /// * `head` - Ending ref (inclusive)
    ///
    /// # Returns
    /// * `Ok(Vec<HostCommit>)` - Commits in chronological order (oldest first)
    /// * `Err` - If either ref cannot be resolved or the walk fails
    fn compare_commits(&self, base: Option<&str>, head: &str) -> Result<Vec<HostCommit>>;
}
