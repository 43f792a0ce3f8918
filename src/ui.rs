use crate::analyzer::ReleasePlan;
use console::style;
use std::fmt::Write;

/// Number of commits listed before the rest are summarised
const COMMIT_PREVIEW: usize = 10;
const MESSAGE_WIDTH: usize = 60;

pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

pub fn display_status(message: &str) {
    eprintln!("{} {}", style("→").yellow(), message);
}

/// Render a release plan as the human readable report
pub fn format_plan(plan: &ReleasePlan) -> String {
    let mut out = String::new();

    let role = if plan.branch.is_prerelease_branch {
        "prerelease branch"
    } else if plan.branch.is_release_branch {
        "release branch"
    } else if plan.branch.is_pull_request {
        "pull request"
    } else {
        "branch"
    };
    let _ = writeln!(out, "{}", style(format!("Analyzing {} '{}'", role, plan.branch.name)).bold());

    let latest = if plan.latest_tag.is_synthetic() {
        format!("{} (no release yet)", plan.latest_tag.name)
    } else {
        plan.latest_tag.name.clone()
    };
    let _ = writeln!(out, "  Latest release:    {}", style(latest).green());
    if let Some(prerelease) = &plan.latest_prerelease_tag {
        let _ = writeln!(out, "  Latest prerelease: {}", style(&prerelease.name).cyan());
    }
    let _ = writeln!(out, "  Baseline:          {}", plan.baseline.name);
    let _ = writeln!(out, "  Valid tags:        {}", plan.tags.len());

    let _ = writeln!(out, "\n{}", style(format!("{} commits:", plan.commits.len())).underlined());
    for (i, commit) in plan.commits.iter().take(COMMIT_PREVIEW).enumerate() {
        let subject = commit.message.lines().next().unwrap_or_default();
        let short: String = subject.chars().take(MESSAGE_WIDTH).collect();
        let _ = writeln!(out, "  {}. {}", i + 1, short);
    }
    if plan.commits.len() > COMMIT_PREVIEW {
        let _ = writeln!(out, "  ... and {} more commits", plan.commits.len() - COMMIT_PREVIEW);
    }

    let _ = writeln!(out, "\n{}", style("Release rules:").underlined());
    for rule in &plan.rules {
        let breaking = match rule.breaking {
            Some(true) => " (breaking)",
            _ => "",
        };
        let _ = writeln!(
            out,
            "  {:<10} {:<10} {}{}",
            rule.r#type,
            rule.release,
            rule.section.as_deref().unwrap_or_default(),
            breaking
        );
    }

    out
}

/// Print the human readable report
pub fn display_plan(plan: &ReleasePlan) {
    print!("{}", format_plan(plan));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BranchContext, Commit, Tag};
    use crate::rules::ChangelogRules;

    fn plan(commit_count: usize) -> ReleasePlan {
        let latest = Tag::new("v1.2.0", "abc");
        ReleasePlan {
            branch: BranchContext::from_ref("refs/heads/main", "main", ""),
            tags: vec![latest.clone()],
            latest_tag: latest.clone(),
            latest_prerelease_tag: None,
            baseline: latest,
            commits: (0..commit_count)
                .map(|i| Commit {
                    message: format!("fix: change {}\n\nbody", i),
                    hash: format!("h{}", i),
                })
                .collect(),
            rules: ChangelogRules::default().merge(&[]),
        }
    }

    #[test]
    fn test_format_plan_lists_tags_and_rules() {
        console::set_colors_enabled(false);
        let text = format_plan(&plan(2));

        assert!(text.contains("Analyzing release branch 'main'"));
        assert!(text.contains("Latest release:    v1.2.0"));
        assert!(text.contains("1. fix: change 0"));
        assert!(!text.contains("body"));
        assert!(text.contains("Bug Fixes"));
        assert!(!text.contains("Latest prerelease"));
    }

    #[test]
    fn test_format_plan_truncates_commit_list() {
        console::set_colors_enabled(false);
        let text = format_plan(&plan(COMMIT_PREVIEW + 3));
        assert!(text.contains("... and 3 more commits"));
    }

    #[test]
    fn test_format_plan_marks_synthetic_baseline() {
        console::set_colors_enabled(false);
        let mut p = plan(0);
        p.latest_tag = Tag::new("v0.0.0", "HEAD");
        assert!(format_plan(&p).contains("v0.0.0 (no release yet)"));
    }
}
