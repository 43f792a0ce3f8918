use crate::commits::{get_commits, scoped_commits};
use crate::config::Config;
use crate::diagnostic::DiagnosticSink;
use crate::domain::{BranchContext, Commit, ReleaseRule, Tag, TagPrefix};
use crate::error::Result;
use crate::git::Repository;
use crate::tags::{get_valid_tags, latest_prerelease_tag, latest_tag};
use serde::Serialize;

/// What to analyze: the ref being released and the revision to stop at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseRequest {
    /// Full git ref, e.g. "refs/heads/main"
    pub git_ref: String,
    /// Revision the commit range ends at (inclusive)
    pub head: String,
}

impl ReleaseRequest {
    pub fn new(git_ref: impl Into<String>, head: impl Into<String>) -> Self {
        ReleaseRequest {
            git_ref: git_ref.into(),
            head: head.into(),
        }
    }
}

/// Inputs for the version bump decision
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReleasePlan {
    pub branch: BranchContext,
    /// Valid tags, newest first
    pub tags: Vec<Tag>,
    pub latest_tag: Tag,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_prerelease_tag: Option<Tag>,
    /// Tag the commit range starts from
    pub baseline: Tag,
    pub commits: Vec<Commit>,
    /// Merged release rules for the classifier
    pub rules: Vec<ReleaseRule>,
}

/// Runs tag selection, commit collection and rule merging for one request
pub struct ReleaseAnalyzer {
    config: Config,
    prefix: TagPrefix,
}

impl ReleaseAnalyzer {
    /// Create a new release analyzer
    ///
    /// Fails when the configured tag prefix is not a valid regex.
    pub fn new(config: Config) -> Result<Self> {
        let prefix = TagPrefix::new(config.tag_prefix.clone())?;
        Ok(ReleaseAnalyzer { config, prefix })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Analyze a repository for the given request
    ///
    /// Repository failures are returned unchanged.
    pub fn analyze<R: Repository + ?Sized>(
        &self,
        repo: &R,
        request: &ReleaseRequest,
        sink: &dyn DiagnosticSink,
    ) -> Result<ReleasePlan> {
        let branch = BranchContext::from_ref(
            &request.git_ref,
            &self.config.release_branches,
            &self.config.pre_release_branches,
        );
        tracing::debug!("Analyzing {:?}", branch);

        let tags = get_valid_tags(repo, &self.prefix, self.config.fetch_all_tags, sink)?;
        let latest = latest_tag(&tags, &self.prefix);
        let latest_prerelease = self
            .config
            .prerelease_identifier
            .as_deref()
            .and_then(|identifier| latest_prerelease_tag(&tags, identifier, &self.prefix))
            .cloned();

        let baseline = self.baseline(&branch, &latest, latest_prerelease.as_ref());
        tracing::info!("Using {} as baseline", baseline.name);

        let base = (!baseline.is_synthetic()).then_some(baseline.commit.sha.as_str());
        let mut commits = get_commits(repo, base, &request.head)?;
        if !self.config.scopes.is_empty() {
            commits = scoped_commits(commits, &self.config.scopes);
            tracing::debug!(
                "{} commits left after scoping to {:?}",
                commits.len(),
                self.config.scopes
            );
        }

        let rules = self.release_rules(sink);

        Ok(ReleasePlan {
            branch,
            tags,
            latest_tag: latest,
            latest_prerelease_tag: latest_prerelease,
            baseline,
            commits,
            rules,
        })
    }

    /// Custom rules expanded and merged into the changelog rule table
    pub fn release_rules(&self, sink: &dyn DiagnosticSink) -> Vec<ReleaseRule> {
        let table = &self.config.changelog_rules;
        let mapped = match self.config.custom_release_rules.as_deref() {
            Some(custom) if !custom.is_empty() => table.map_custom_release_rules(custom, sink),
            _ => Vec::new(),
        };
        table.merge(&mapped)
    }

    /// On prerelease branches a newer prerelease tag replaces the stable one
    fn baseline(&self, branch: &BranchContext, latest: &Tag, prerelease: Option<&Tag>) -> Tag {
        let Some(prerelease) = prerelease.filter(|_| branch.is_prerelease_branch) else {
            return latest.clone();
        };

        let stable_version = self
            .prefix
            .parse_version(&latest.name)
            .unwrap_or_else(|| semver::Version::new(0, 0, 0));

        match self.prefix.parse_version(&prerelease.name) {
            Some(version) if version.cmp_precedence(&stable_version).is_gt() => prerelease.clone(),
            _ => latest.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::RecordingSink;
    use crate::domain::{HostCommit, ReleaseType};
    use crate::git::MockRepository;

    fn repo_with_tags(names: &[&str]) -> MockRepository {
        let mut repo = MockRepository::new();
        for name in names {
            repo.add_tag(Tag::new(*name, format!("sha-{}", name)));
        }
        repo.add_commit(HostCommit::new("c1", Some("feat(api): add endpoint")));
        repo.add_commit(HostCommit::new("c2", Some("")));
        repo.add_commit(HostCommit::new("c3", Some("fix(web): repair")));
        repo
    }

    fn main_request() -> ReleaseRequest {
        ReleaseRequest::new("refs/heads/main", "HEAD")
    }

    #[test]
    fn test_analyze_stable_release() {
        let repo = repo_with_tags(&["v1.0.0", "v1.1.0", "junk", "v1.2.0-beta.1"]);
        let analyzer = ReleaseAnalyzer::new(Config::default()).unwrap();
        let sink = RecordingSink::new();

        let plan = analyzer.analyze(&repo, &main_request(), &sink).unwrap();

        assert!(plan.branch.is_release_branch);
        assert_eq!(plan.tags.len(), 3);
        assert_eq!(plan.latest_tag.name, "v1.1.0");
        assert_eq!(plan.latest_prerelease_tag, None);
        assert_eq!(plan.baseline.name, "v1.1.0");
        assert_eq!(plan.commits.len(), 2);
        assert_eq!(plan.rules, analyzer.config().changelog_rules.merge(&[]));
        assert_eq!(
            repo.last_comparison(),
            Some((Some("sha-v1.1.0".to_string()), "HEAD".to_string()))
        );
    }

    #[test]
    fn test_analyze_without_tags_walks_from_root() {
        let repo = repo_with_tags(&[]);
        let analyzer = ReleaseAnalyzer::new(Config::default()).unwrap();
        let sink = RecordingSink::new();

        let plan = analyzer.analyze(&repo, &main_request(), &sink).unwrap();

        assert_eq!(plan.latest_tag.name, "v0.0.0");
        assert!(plan.baseline.is_synthetic());
        assert_eq!(repo.last_comparison(), Some((None, "HEAD".to_string())));
    }

    #[test]
    fn test_analyze_prerelease_branch_uses_newer_prerelease() {
        let repo = repo_with_tags(&["v1.0.0", "v2.0.0-beta.1", "v2.0.0-beta.2"]);
        let config = Config {
            pre_release_branches: "develop".to_string(),
            prerelease_identifier: Some("beta".to_string()),
            ..Config::default()
        };
        let analyzer = ReleaseAnalyzer::new(config).unwrap();
        let sink = RecordingSink::new();

        let plan = analyzer
            .analyze(&repo, &ReleaseRequest::new("refs/heads/develop", "HEAD"), &sink)
            .unwrap();

        assert!(plan.branch.is_prerelease_branch);
        assert_eq!(plan.latest_tag.name, "v1.0.0");
        assert_eq!(
            plan.latest_prerelease_tag.as_ref().map(|t| t.name.as_str()),
            Some("v2.0.0-beta.2")
        );
        assert_eq!(plan.baseline.name, "v2.0.0-beta.2");
    }

    #[test]
    fn test_analyze_stale_prerelease_keeps_stable_baseline() {
        let repo = repo_with_tags(&["v2.0.0", "v2.0.0-beta.2"]);
        let config = Config {
            pre_release_branches: "develop".to_string(),
            prerelease_identifier: Some("beta".to_string()),
            ..Config::default()
        };
        let analyzer = ReleaseAnalyzer::new(config).unwrap();
        let sink = RecordingSink::new();

        let plan = analyzer
            .analyze(&repo, &ReleaseRequest::new("refs/heads/develop", "HEAD"), &sink)
            .unwrap();
        assert_eq!(plan.baseline.name, "v2.0.0");
    }

    #[test]
    fn test_analyze_release_branch_ignores_prerelease_for_baseline() {
        let repo = repo_with_tags(&["v1.0.0", "v2.0.0-beta.1"]);
        let config = Config {
            prerelease_identifier: Some("beta".to_string()),
            ..Config::default()
        };
        let analyzer = ReleaseAnalyzer::new(config).unwrap();
        let sink = RecordingSink::new();

        let plan = analyzer.analyze(&repo, &main_request(), &sink).unwrap();
        assert!(plan.latest_prerelease_tag.is_some());
        assert_eq!(plan.baseline.name, "v1.0.0");
    }

    #[test]
    fn test_analyze_scopes_commits() {
        let repo = repo_with_tags(&["v1.0.0"]);
        let config = Config {
            scopes: vec!["api".to_string()],
            ..Config::default()
        };
        let analyzer = ReleaseAnalyzer::new(config).unwrap();
        let sink = RecordingSink::new();

        let plan = analyzer.analyze(&repo, &main_request(), &sink).unwrap();
        assert_eq!(plan.commits.len(), 1);
        assert_eq!(plan.commits[0].hash, "c1");
    }

    #[test]
    fn test_analyze_merges_custom_rules() {
        let repo = repo_with_tags(&["v1.0.0"]);
        let config = Config {
            custom_release_rules: Some("fix:minor,bad".to_string()),
            ..Config::default()
        };
        let analyzer = ReleaseAnalyzer::new(config).unwrap();
        let sink = RecordingSink::new();

        let plan = analyzer.analyze(&repo, &main_request(), &sink).unwrap();
        let fix = plan.rules.iter().find(|r| r.r#type == "fix").unwrap();
        assert_eq!(fix.release, ReleaseType::Minor);
        assert_eq!(fix.breaking, Some(false));
        assert_eq!(sink.warnings().len(), 1);
    }

    #[test]
    fn test_analyze_propagates_repository_failure() {
        let mut repo = repo_with_tags(&["v1.0.0"]);
        repo.fail_with("host unavailable");
        let analyzer = ReleaseAnalyzer::new(Config::default()).unwrap();
        let sink = RecordingSink::new();

        let err = analyzer.analyze(&repo, &main_request(), &sink).unwrap_err();
        assert_eq!(err.to_string(), "Repository operation failed: host unavailable");
    }

    #[test]
    fn test_invalid_prefix_rejected() {
        let config = Config {
            tag_prefix: "v(".to_string(),
            ..Config::default()
        };
        assert!(ReleaseAnalyzer::new(config).is_err());
    }
}
