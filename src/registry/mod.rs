//! Registry adapters for resolving tags to commits
//!
//! This module provides:
//! - HTTP client shared foundation
//! - GitHub tags adapter

mod client;
mod github;

pub use client::{HttpClient, DEFAULT_TIMEOUT};
pub use github::{select_commit, GitHubTagsAdapter, TagCommit, TagEntry, GITHUB_API_URL};

use crate::domain::{ModuleReference, ResolvedCommit};
use crate::error::RegistryError;
use async_trait::async_trait;

/// Trait for resolving a module's tag to the revision that gets pinned
#[async_trait]
pub trait TagResolver: Send + Sync {
    /// Get the registry name
    fn registry_name(&self) -> &'static str;

    /// Resolve the tag of `module`
    async fn resolve(&self, module: &ModuleReference) -> Result<ResolvedCommit, RegistryError>;
}
