//! Tag validation, ordering and baseline selection

use crate::diagnostic::{Diagnostic, DiagnosticSink};
use crate::domain::{Tag, TagPrefix};
use crate::error::Result;
use crate::git::Repository;
use regex::Regex;

/// Fetch tags from the host and keep the valid ones, newest first
///
/// Host failures are returned as-is.
pub fn get_valid_tags<R: Repository + ?Sized>(
    repo: &R,
    prefix: &TagPrefix,
    fetch_all: bool,
    sink: &dyn DiagnosticSink,
) -> Result<Vec<Tag>> {
    let tags = repo.list_tags(fetch_all)?;
    tracing::debug!("Fetched {} tags (fetch_all: {})", tags.len(), fetch_all);
    Ok(validate_tags(tags, prefix, sink))
}

/// Drop tags that are not `[prefix]{semver}` and sort the rest by
/// descending semantic version precedence
///
/// Build metadata does not take part in the ordering; tags of equal
/// precedence keep their input order.
pub fn validate_tags(tags: Vec<Tag>, prefix: &TagPrefix, sink: &dyn DiagnosticSink) -> Vec<Tag> {
    let mut valid: Vec<(semver::Version, Tag)> = Vec::with_capacity(tags.len());

    for tag in tags {
        match prefix.parse_version(&tag.name) {
            Some(version) => valid.push((version, tag)),
            None => sink.report(Diagnostic::InvalidTag { tag: tag.name }),
        }
    }

    valid.sort_by(|(a, _), (b, _)| b.cmp_precedence(a));

    valid
        .into_iter()
        .map(|(_, tag)| {
            sink.report(Diagnostic::ValidTag {
                tag: tag.name.clone(),
            });
            tag
        })
        .collect()
}

/// Latest stable release tag, or the synthetic `{prefix}0.0.0` at `HEAD`
///
/// `tags` is expected to be sorted newest first, as returned by
/// [`validate_tags`].
pub fn latest_tag(tags: &[Tag], prefix: &TagPrefix) -> Tag {
    tags.iter()
        .find(|tag| {
            prefix
                .parse_version(&tag.name)
                .is_some_and(|version| version.pre.is_empty())
        })
        .cloned()
        .unwrap_or_else(|| Tag::synthetic(prefix))
}

/// Latest prerelease tag whose version matches `identifier`
///
/// `identifier` is a regex tested anywhere in the prefix-stripped name, so
/// "beta" also matches "1.0.0-beta-extra.1". Identifiers that do not compile
/// as a regex are matched literally.
pub fn latest_prerelease_tag<'a>(
    tags: &'a [Tag],
    identifier: &str,
    prefix: &TagPrefix,
) -> Option<&'a Tag> {
    let pattern = Regex::new(identifier)
        .or_else(|_| Regex::new(&regex::escape(identifier)))
        .ok()?;

    tags.iter()
        .filter(|tag| {
            prefix
                .parse_version(&tag.name)
                .is_some_and(|version| !version.pre.is_empty())
        })
        .find(|tag| pattern.is_match(&prefix.strip(&tag.name)))
}
