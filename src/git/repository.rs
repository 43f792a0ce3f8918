use crate::domain::{HostCommit, Tag};
use crate::error::{Result, TagBumpError};
use crate::git::TAG_PAGE_SIZE;
use git2::{Oid, Repository as Git2Repo, Sort};
use std::path::Path;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    /// Full name of the ref HEAD points at (e.g. "refs/heads/main")
    pub fn head_ref(&self) -> Result<String> {
        let head = self.repo.head()?;
        head.name()
            .map(str::to_string)
            .ok_or_else(|| TagBumpError::repository("HEAD reference name is not valid UTF-8"))
    }

    fn resolve_commit(&self, rev: &str) -> Result<Oid> {
        let object = self.repo.revparse_single(rev)?;
        Ok(object.peel_to_commit()?.id())
    }
}

impl super::Repository for Git2Repository {
    fn list_tags(&self, fetch_all: bool) -> Result<Vec<Tag>> {
        let names = self.repo.tag_names(None)?;
        let limit = if fetch_all { usize::MAX } else { TAG_PAGE_SIZE };

        let mut tags = Vec::new();
        for name in names.iter().flatten().take(limit) {
            let reference = self.repo.find_reference(&format!("refs/tags/{}", name))?;

            // Tags on trees or blobs have no commit to compare from
            match reference.peel_to_commit() {
                Ok(commit) => tags.push(Tag::new(name, commit.id().to_string())),
                Err(e) => tracing::debug!("Skipping tag '{}': {}", name, e),
            }
        }

        Ok(tags)
    }

    fn compare_commits(&self, base: Option<&str>, head: &str) -> Result<Vec<HostCommit>> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::REVERSE)?;
        revwalk.push(self.resolve_commit(head)?)?;

        if let Some(base) = base {
            revwalk.hide(self.resolve_commit(base)?)?;
        }

        let mut commits = Vec::new();
        for oid_result in revwalk {
            let oid = oid_result?;
            let commit = self.repo.find_commit(oid)?;
            commits.push(HostCommit::new(oid.to_string(), commit.message()));
        }

        Ok(commits)
    }
}
