//! Core domain models for mmgoget
//!
//! This module contains the fundamental types used throughout the application:
//! - The module reference the user asked for
//! - The commit (or fallback tag) it resolved to

mod module_ref;
mod resolved;

pub use module_ref::{ModuleReference, MODULE_HOST};
pub use resolved::{ResolutionSource, ResolvedCommit, SHORT_SHA_LEN};
