//! Text output formatter for human-readable display

use crate::domain::ResolutionSource;
use crate::orchestrator::PinOutcome;
use crate::output::{OutputFormatter, Verbosity};
use colored::Colorize;
use std::io::Write;

/// Text formatter for human-readable output
pub struct TextFormatter {
    verbosity: Verbosity,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }

    /// Short note explaining where the revision came from
    fn source_note(outcome: &PinOutcome) -> String {
        match outcome.resolved.source {
            ResolutionSource::Tag => format!("tag {}", outcome.module.tag),
            ResolutionSource::Fallback => {
                format!("tag {} not listed, used as-is", outcome.module.tag)
            }
        }
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, outcome: &PinOutcome, writer: &mut dyn Write) -> std::io::Result<()> {
        if self.verbosity == Verbosity::Quiet {
            return Ok(());
        }

        let source_note = Self::source_note(outcome);
        let source_colored = match outcome.resolved.source {
            ResolutionSource::Tag => source_note.as_str().dimmed(),
            ResolutionSource::Fallback => source_note.as_str().yellow(),
        };
        let target = outcome.target();

        writeln!(
            writer,
            "{} {} ({})",
            "✓".green(),
            target.as_str().bright_white().bold(),
            source_colored
        )?;

        if let Some(path) = &outcome.annotated {
            writeln!(writer, "  {} {}", "annotated".cyan(), path.display())?;
        }

        if self.verbosity == Verbosity::Verbose {
            writeln!(writer, "  module:   {}", outcome.module.path())?;
            writeln!(writer, "  revision: {}", outcome.resolved)?;
        }

        Ok(())
    }
}
