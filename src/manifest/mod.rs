//! go.mod handling
//!
//! This module provides functionality to:
//! - Parse go.mod into a syntax tree and format it back
//! - Annotate a require entry with the tag its pinned commit came from
//! - Replace the manifest on disk through a recoverable backup

mod annotator;
mod go_mod;
mod writer;

pub use annotator::{
    annotate_content, annotation_comment, is_marker, ManifestAnnotator, DEFAULT_MANIFEST,
    MARKER_PREFIX,
};
pub use go_mod::GoModFile;
pub use writer::{read_manifest, replace_manifest, BACKUP_SUFFIX};
