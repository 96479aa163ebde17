//! Input parsers
//!
//! This module provides:
//! - The module reference parser (`github.com/<owner>/<project>/<vN>@<tag>`)

mod reference;

pub use reference::parse_reference;
