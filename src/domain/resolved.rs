//! Resolved commit value

use serde::Serialize;
use std::fmt;

/// Number of leading SHA characters kept when pinning
pub const SHORT_SHA_LEN: usize = 10;

/// Where a resolved revision came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionSource {
    /// A tag with the requested name was listed by the API
    Tag,
    /// No tag matched; the requested ref is used as-is
    Fallback,
}

/// The revision that gets pinned for a module
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedCommit {
    /// Short SHA, or the original ref for a fallback
    pub revision: String,
    /// How the revision was obtained
    pub source: ResolutionSource,
}

impl ResolvedCommit {
    /// Build from a full commit SHA, keeping the first [`SHORT_SHA_LEN`] characters
    pub fn from_sha(sha: &str) -> Self {
        let revision: String = sha.chars().take(SHORT_SHA_LEN).collect();
        Self {
            revision,
            source: ResolutionSource::Tag,
        }
    }

    /// Use the requested ref unchanged. It may already be a commit hash,
    /// or the tag may not be within the listed page.
    pub fn fallback(tag: impl Into<String>) -> Self {
        Self {
            revision: tag.into(),
            source: ResolutionSource::Fallback,
        }
    }

    /// Returns true if the revision came from a matching tag
    pub fn is_from_tag(&self) -> bool {
        self.source == ResolutionSource::Tag
    }

    /// The revision string
    pub fn as_str(&self) -> &str {
        &self.revision
    }
}

impl fmt::Display for ResolvedCommit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.revision)
    }
}
