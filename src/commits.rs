//! Commit retrieval and scope filtering

use crate::domain::Commit;
use crate::error::Result;
use crate::git::Repository;
use regex::Regex;

/// Conventional commit types recognised when filtering by scope
const SCOPED_TYPES: &str = "build|chore|ci|docs|feat|fix|perf|refactor|revert|style|test";

/// Commits between two refs, without the ones that have no message
///
/// `base = None` walks back to the root of history.
pub fn get_commits<R: Repository + ?Sized>(
    repo: &R,
    base: Option<&str>,
    head: &str,
) -> Result<Vec<Commit>> {
    let commits: Vec<Commit> = repo
        .compare_commits(base, head)?
        .into_iter()
        .filter_map(Commit::from_host)
        .collect();

    tracing::debug!(
        "Found {} commits between {} and {}",
        commits.len(),
        base.unwrap_or("<root>"),
        head
    );
    Ok(commits)
}

/// Keep commits whose header is `type(scope): subject` for any of `scopes`
///
/// Scopes are inserted into the pattern unescaped. A scope that does not
/// form a valid regex never matches. An empty `scopes` list keeps nothing.
/// Subjects are limited to ASCII word characters and spaces.
pub fn scoped_commits(commits: Vec<Commit>, scopes: &[String]) -> Vec<Commit> {
    let patterns: Vec<Regex> = scopes
        .iter()
        .filter_map(|scope| {
            let pattern = format!(r"^({})\({}\): [A-Za-z0-9_ ]+", SCOPED_TYPES, scope);
            match Regex::new(&pattern) {
                Ok(re) => Some(re),
                Err(e) => {
                    tracing::warn!("Ignoring scope '{}': {}", scope, e);
                    None
                }
            }
        })
        .collect();

    commits
        .into_iter()
        .filter(|commit| patterns.iter().any(|re| re.is_match(&commit.message)))
        .collect()
}
