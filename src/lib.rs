//! mmgoget - pin a Go module to the commit behind a GitHub tag
//!
//! This library provides the pieces behind the `mmgoget` binary:
//! - Parsing `github.com/<owner>/<project>/<vN>@<tag>` references
//! - Resolving the tag to a short commit SHA through the GitHub API
//! - Running `go get` with the commit pinned
//! - Annotating go.mod with the tag the commit came from

pub mod cli;
pub mod domain;
pub mod error;
pub mod manifest;
pub mod orchestrator;
pub mod output;
pub mod package_manager;
pub mod parser;
pub mod progress;
pub mod registry;
