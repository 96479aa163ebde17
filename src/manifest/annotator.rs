//! go.mod annotation
//!
//! Records, above the require entry of a freshly pinned module, which tag
//! the pinned commit corresponds to:
//!
//! ```text
//! // mmgoget: github.com/acme/widgets/v3@v1.2.0 is replaced by -> github.com/acme/widgets/v3@abcdef1234
//! github.com/acme/widgets/v3 v3.0.0-20240101000000-abcdef123456
//! ```
//!
//! Earlier annotations carrying the same marker are replaced, never stacked.

use crate::domain::{ModuleReference, ResolvedCommit};
use crate::error::ManifestError;
use crate::manifest::go_mod::GoModFile;
use crate::manifest::writer::{read_manifest, replace_manifest};
use std::path::{Path, PathBuf};

/// Default manifest file name, relative to the working directory
pub const DEFAULT_MANIFEST: &str = "go.mod";

/// Prefix identifying comments written by this tool
pub const MARKER_PREFIX: &str = "// mmgoget";

/// Comment text recording the tag-to-commit mapping
pub fn annotation_comment(module: &ModuleReference, resolved: &ResolvedCommit) -> String {
    format!(
        "{}: {} is replaced by -> {}",
        MARKER_PREFIX,
        module.pinned(&module.tag),
        module.pinned(resolved.as_str())
    )
}

/// Returns true if `comment` was written by this tool
pub fn is_marker(comment: &str) -> bool {
    comment.trim_start().starts_with(MARKER_PREFIX)
}

/// Annotate go.mod content, returning the rewritten text
///
/// Returns `None` when no require entry matches the module path.
/// `path` is only used in error messages.
pub fn annotate_content(
    content: &str,
    path: &Path,
    module: &ModuleReference,
    resolved: &ResolvedCommit,
) -> Result<Option<String>, ManifestError> {
    let mut file = GoModFile::parse(content, path)?;
    let module_path = module.path();
    let comment = annotation_comment(module, resolved);

    let mut matched = 0;
    for entry in file.requirements_mut() {
        if entry.path != module_path {
            continue;
        }
        entry.line.before.retain(|c| !is_marker(c));
        entry.line.before.push(comment.clone());
        matched += 1;
    }

    if matched == 0 {
        return Ok(None);
    }

    Ok(Some(file.format()))
}

/// Rewrites a manifest file in place with the annotation
#[derive(Debug, Clone)]
pub struct ManifestAnnotator {
    path: PathBuf,
}

impl ManifestAnnotator {
    /// Create an annotator for the manifest at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the manifest being annotated
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read, annotate and replace the manifest
    ///
    /// Returns `false` without touching the file when the module is not
    /// required there. On any failure the manifest keeps its original content.
    pub fn annotate(
        &self,
        module: &ModuleReference,
        resolved: &ResolvedCommit,
    ) -> Result<bool, ManifestError> {
        let content = read_manifest(&self.path)?;
        match annotate_content(&content, &self.path, module, resolved)? {
            Some(updated) => {
                replace_manifest(&self.path, &updated)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

impl Default for ManifestAnnotator {
    fn default() -> Self {
        Self::new(DEFAULT_MANIFEST)
    }
}
