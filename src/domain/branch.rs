use regex::Regex;
use serde::Serialize;

const HEADS_PREFIX: &str = "refs/heads/";
const PULL_MARKER: &str = "refs/pull/";

/// Strip `refs/heads/` from a git ref ("refs/heads/main" -> "main")
pub fn branch_from_ref(git_ref: &str) -> String {
    git_ref.replace(HEADS_PREFIX, "")
}

/// Check whether a git ref points at a pull request
pub fn is_pull_request_ref(git_ref: &str) -> bool {
    git_ref.contains(PULL_MARKER)
}

/// Check a branch against a comma-separated list of branch regexes
///
/// Entries that are not valid regexes are compared literally.
pub fn matches_branch_list(branch: &str, list: &str) -> bool {
    list.split(',')
        .map(str::trim)
        .filter(|pattern| !pattern.is_empty())
        .any(|pattern| match Regex::new(pattern) {
            Ok(re) => re.is_match(branch),
            Err(_) => branch == pattern,
        })
}

/// Represents the branch being released, with its role
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BranchContext {
    pub name: String,
    pub is_pull_request: bool,
    pub is_release_branch: bool,
    pub is_prerelease_branch: bool,
}

impl BranchContext {
    /// Classify a git ref against the release and prerelease branch lists
    pub fn from_ref(git_ref: &str, release_branches: &str, pre_release_branches: &str) -> Self {
        let name = branch_from_ref(git_ref);
        let is_release_branch = matches_branch_list(&name, release_branches);
        let is_prerelease_branch = matches_branch_list(&name, pre_release_branches);

        BranchContext {
            is_pull_request: is_pull_request_ref(git_ref),
            is_release_branch,
            is_prerelease_branch,
            name,
        }
    }
}
