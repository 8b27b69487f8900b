//! Version filtering, ordering and selection

use semver::Version;
use std::collections::BTreeMap;
use tracing::debug;

/// Major lines offered to the user
pub const MAJOR_LINES_SHOWN: usize = 2;

/// Releases offered per major line
pub const RELEASES_PER_MAJOR: usize = 3;

/// Pre-release channels that are never offered
const EXCLUDED_CHANNELS: &[&str] = &["rc", "canary"];

/// A published version and its publish timestamp
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRecord {
    pub version: String,
    pub published: Option<String>,
}

impl VersionRecord {
    pub fn new(version: impl Into<String>, published: Option<&str>) -> Self {
        Self {
            version: version.into(),
            published: published.map(str::to_string),
        }
    }
}

/// Whether a version identifier belongs to an `rc` or `canary` channel
pub fn is_prerelease_channel(version: &str) -> bool {
    EXCLUDED_CHANNELS.iter().any(|marker| version.contains(marker))
}

/// Drop `rc`/`canary` builds and order by descending semver precedence
///
/// Identifiers that are not valid semver cannot be ranked and are dropped.
pub fn filter_and_sort(records: Vec<VersionRecord>) -> Vec<VersionRecord> {
    let mut ranked: Vec<(Version, VersionRecord)> = records
        .into_iter()
        .filter(|r| !is_prerelease_channel(&r.version))
        .filter_map(|r| match Version::parse(&r.version) {
            Ok(v) => Some((v, r)),
            Err(e) => {
                debug!(version = %r.version, "skipping unparseable version: {}", e);
                None
            }
        })
        .collect();

    ranked.sort_by(|(a, _), (b, _)| b.cmp(a));
    ranked.into_iter().map(|(_, r)| r).collect()
}

/// Reduce a descending version list to the newest releases of the two
/// highest major lines
pub fn select_recent_versions(records: &[VersionRecord]) -> Vec<String> {
    let mut by_major: BTreeMap<u64, Vec<&str>> = BTreeMap::new();
    for record in records {
        if let Ok(v) = Version::parse(&record.version) {
            by_major.entry(v.major).or_default().push(&record.version);
        }
    }

    by_major
        .into_iter()
        .rev()
        .take(MAJOR_LINES_SHOWN)
        .flat_map(|(_, versions)| versions.into_iter().take(RELEASES_PER_MAJOR))
        .map(str::to_string)
        .collect()
}
