//! Data-version resolution.
//!
//! Every release of the game stamps files with an integer data version. The
//! table below maps the versions this bot knows about to their release
//! labels; [`resolve_data_version`] classifies any integer into one of four
//! buckets: below the table, above it, an exact hit, or a gap inside the
//! table's span. Every input produces a printable result.

use std::fmt;

/// Known data versions, ascending by key.
pub const DATA_VERSIONS: &[(i32, &str)] = &[
    (3463, "1.20"),
    (3465, "1.20.1"),
    (3578, "1.20.2"),
    (3698, "1.20.3"),
    (3700, "1.20.4"),
    (3837, "1.20.5"),
    (3839, "1.20.6"),
    (3953, "1.21"),
    (3955, "1.21.1"),
    (4080, "1.21.2"),
    (4082, "1.21.3"),
    (4189, "1.21.4"),
    (4325, "1.21.5"),
];

/// Reference list for unmapped versions, linked in the rendered message.
const DATA_VERSION_WIKI: &str = "https://minecraft.wiki/w/Data_version#List_of_data_versions";

/// Outcome of mapping a data version against [`DATA_VERSIONS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionResolution {
    /// Exact table hit; carries the release label.
    Exact(&'static str),
    /// Older than the lowest known version.
    BelowRange(i32),
    /// Newer than the highest known version.
    AboveRange(i32),
    /// Inside the table's span but not a known key.
    UnknownInRange(i32),
}

/// Lowest known data version and its label.
fn lowest() -> (i32, &'static str) {
    DATA_VERSIONS[0]
}

/// Highest known data version and its label.
fn highest() -> (i32, &'static str) {
    DATA_VERSIONS[DATA_VERSIONS.len() - 1]
}

/// Classify a data version. Keys equal to the table bounds are exact hits.
pub fn resolve_data_version(data_version: i32) -> VersionResolution {
    if data_version < lowest().0 {
        return VersionResolution::BelowRange(data_version);
    }
    if data_version > highest().0 {
        return VersionResolution::AboveRange(data_version);
    }
    match DATA_VERSIONS.binary_search_by_key(&data_version, |(key, _)| *key) {
        Ok(index) => VersionResolution::Exact(DATA_VERSIONS[index].1),
        Err(_) => VersionResolution::UnknownInRange(data_version),
    }
}

impl fmt::Display for VersionResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionResolution::Exact(label) => write!(f, "{label}"),
            VersionResolution::BelowRange(raw) => write!(
                f,
                "<{} ([unmapped data version: {raw}](<{DATA_VERSION_WIKI}>))",
                lowest().1
            ),
            VersionResolution::AboveRange(raw) => write!(
                f,
                ">{} ([unmapped data version: {raw}](<{DATA_VERSION_WIKI}>))",
                highest().1
            ),
            VersionResolution::UnknownInRange(raw) => {
                write!(f, "Unknown ([data version: {raw}](<{DATA_VERSION_WIKI}>))")
            }
        }
    }
}
