//! GitHub tags adapter
//!
//! Resolves a tag to its commit through the REST API.
//! API endpoint:
//! - List tags: https://api.github.com/repos/{owner}/{repo}/tags?per_page=200
//!
//! Only the first page is read. Requests are unauthenticated.

use crate::domain::{ModuleReference, ResolvedCommit};
use crate::error::RegistryError;
use crate::registry::{HttpClient, TagResolver};
use async_trait::async_trait;
use serde::Deserialize;

/// Public GitHub API base URL
pub const GITHUB_API_URL: &str = "https://api.github.com";

/// Number of tags requested in the single page that is scanned
pub const TAGS_PER_PAGE: u32 = 200;

/// A single entry of the tag listing
#[derive(Debug, Clone, Deserialize)]
pub struct TagEntry {
    /// Tag name
    pub name: String,
    /// Commit the tag points at
    pub commit: TagCommit,
}

/// Commit reference inside a tag entry
#[derive(Debug, Clone, Deserialize)]
pub struct TagCommit {
    /// Full commit SHA
    pub sha: String,
}

/// GitHub tags adapter
pub struct GitHubTagsAdapter {
    client: HttpClient,
    base_url: String,
}

impl GitHubTagsAdapter {
    /// Create a new adapter against the public API
    pub fn new(client: HttpClient) -> Self {
        Self::with_base_url(client, GITHUB_API_URL)
    }

    /// Create a new adapter against another API root (e.g. GitHub Enterprise)
    pub fn with_base_url(client: HttpClient, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Build the URL for listing tags
    fn build_tags_url(&self, owner: &str, project: &str) -> String {
        format!(
            "{}/repos/{}/{}/tags?per_page={}",
            self.base_url, owner, project, TAGS_PER_PAGE
        )
    }
}

/// Pick the revision for `tag` out of a tag listing
///
/// The first entry whose name equals `tag` wins. Without a match the tag
/// itself is returned, since it may already be a commit hash or sit beyond
/// the listed page.
pub fn select_commit(tags: &[TagEntry], tag: &str) -> ResolvedCommit {
    tags.iter()
        .find(|t| t.name == tag)
        .map(|t| ResolvedCommit::from_sha(&t.commit.sha))
        .unwrap_or_else(|| ResolvedCommit::fallback(tag))
}

#[async_trait]
impl TagResolver for GitHubTagsAdapter {
    fn registry_name(&self) -> &'static str {
        "GitHub"
    }

    async fn resolve(&self, module: &ModuleReference) -> Result<ResolvedCommit, RegistryError> {
        let url = self.build_tags_url(&module.owner, &module.project);
        let tags: Vec<TagEntry> = self
            .client
            .get_json(&url, &module.repository(), self.registry_name())
            .await?;

        Ok(select_commit(&tags, &module.tag))
    }
}
