//! Module reference parser
//!
//! Accepts `github.com/<owner>/<project>/<vMAJOR>@<tag>`. Owner and project
//! are matched up to the next slash, so nested paths such as
//! `github.com/org/group/repo/v2@v2.0.0` are not supported.

use crate::domain::ModuleReference;
use crate::error::ReferenceError;
use regex::Regex;
use std::str::FromStr;
use std::sync::LazyLock;

// github.com/<owner>/<project>/<vN>@<tag>
static REFERENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"github\.com/([^/]+)/([^/]+)/(v\d+)@(.+)").unwrap());

/// Parse a module reference string
pub fn parse_reference(input: &str) -> Result<ModuleReference, ReferenceError> {
    let caps = REFERENCE_RE
        .captures(input)
        .ok_or_else(|| ReferenceError::invalid_format(input))?;

    // Every group is mandatory and non-empty, so a match fills all four fields
    let field = |i: usize| caps.get(i).map(|m| m.as_str()).unwrap_or_default();

    Ok(ModuleReference::new(field(1), field(2), field(3), field(4)))
}

impl FromStr for ModuleReference {
    type Err = ReferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_reference(s)
    }
}
