//! Module reference structures

use serde::{Deserialize, Serialize};
use std::fmt;

/// Host every module reference is rooted at
pub const MODULE_HOST: &str = "github.com";

/// A Go module on GitHub together with the ref the user wants pinned
///
/// All four fields are non-empty when produced by
/// [`parse_reference`](crate::parser::parse_reference).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleReference {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub project: String,
    /// Major version suffix, e.g. `v3`
    pub major_version: String,
    /// Tag (or raw ref) after the `@`
    pub tag: String,
}

impl ModuleReference {
    /// Creates a new module reference
    pub fn new(
        owner: impl Into<String>,
        project: impl Into<String>,
        major_version: impl Into<String>,
        tag: impl Into<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            project: project.into(),
            major_version: major_version.into(),
            tag: tag.into(),
        }
    }

    /// Module path as it appears in go.mod, without any version
    pub fn path(&self) -> String {
        format!(
            "{}/{}/{}/{}",
            MODULE_HOST, self.owner, self.project, self.major_version
        )
    }

    /// `owner/project`, the repository slug used by the GitHub API
    pub fn repository(&self) -> String {
        format!("{}/{}", self.owner, self.project)
    }

    /// Module path pinned at the given revision, the argument handed to `go get`
    pub fn pinned(&self, revision: &str) -> String {
        format!("{}@{}", self.path(), revision)
    }
}

impl fmt::Display for ModuleReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pinned(&self.tag))
    }
}
