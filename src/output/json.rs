//! JSON output formatter for machine processing

use crate::domain::ResolutionSource;
use crate::orchestrator::PinOutcome;
use crate::output::OutputFormatter;
use serde::Serialize;
use std::io::Write;

/// JSON formatter for machine-readable output
#[derive(Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new() -> Self {
        Self
    }
}

/// JSON representation of a pin
#[derive(Serialize)]
struct JsonOutput<'a> {
    /// Module path without revision
    module: String,
    /// Tag the user asked for
    tag: &'a str,
    /// Revision handed to `go get`
    revision: &'a str,
    /// Whether the revision came from a listed tag
    source: ResolutionSource,
    /// Full `go get` argument
    target: String,
    /// Manifest that was annotated, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    annotated: Option<String>,
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, outcome: &PinOutcome, writer: &mut dyn Write) -> std::io::Result<()> {
        let output = JsonOutput {
            module: outcome.module.path(),
            tag: &outcome.module.tag,
            revision: outcome.resolved.as_str(),
            source: outcome.resolved.source,
            target: outcome.target(),
            annotated: outcome
                .annotated
                .as_ref()
                .map(|p| p.display().to_string()),
        };

        serde_json::to_writer_pretty(&mut *writer, &output)?;
        writeln!(writer)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ModuleReference, ResolvedCommit};
    use std::path::PathBuf;

    fn render(outcome: &PinOutcome) -> serde_json::Value {
        let mut buf = Vec::new();
        JsonFormatter::new().format(outcome, &mut buf).unwrap();
        serde_json::from_slice(&buf).unwrap()
    }

    #[test]
    fn test_json_schema() {
        let outcome = PinOutcome {
            module: ModuleReference::new("acme", "widgets", "v3", "v1.2.0"),
            resolved: ResolvedCommit::from_sha("abcdef1234567890"),
            annotated: Some(PathBuf::from("go.mod")),
        };
        let json = render(&outcome);

        assert_eq!(json["module"], "github.com/acme/widgets/v3");
        assert_eq!(json["tag"], "v1.2.0");
        assert_eq!(json["revision"], "abcdef1234");
        assert_eq!(json["source"], "tag");
        assert_eq!(json["target"], "github.com/acme/widgets/v3@abcdef1234");
        assert_eq!(json["annotated"], "go.mod");
    }

    #[test]
    fn test_json_fallback_without_annotation() {
        let outcome = PinOutcome {
            module: ModuleReference::new("acme", "widgets", "v3", "deadbeef"),
            resolved: ResolvedCommit::fallback("deadbeef"),
            annotated: None,
        };
        let json = render(&outcome);

        assert_eq!(json["source"], "fallback");
        assert_eq!(json["revision"], "deadbeef");
        assert!(json.get("annotated").is_none());
    }
}
