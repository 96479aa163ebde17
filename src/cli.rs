//! CLI argument parsing module for mmgoget

use crate::manifest::DEFAULT_MANIFEST;
use crate::package_manager::DEFAULT_GO_PROGRAM;
use crate::registry::GITHUB_API_URL;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Parse a timeout in seconds, with or without an `s` suffix (e.g. `30`, `45s`)
fn parse_timeout(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty timeout".to_string());
    }

    let num_str = s.strip_suffix('s').unwrap_or(s);
    let secs: u64 = num_str
        .parse()
        .map_err(|_| format!("invalid number of seconds: {}", num_str))?;

    if secs == 0 {
        return Err("timeout must be at least 1 second".to_string());
    }

    Ok(Duration::from_secs(secs))
}

/// Resolve a GitHub tag to its commit and go get the module pinned at that commit
#[derive(Parser, Debug, Clone)]
#[command(
    name = "mmgoget",
    version,
    about = "mmgoget is a command line tool to ease your pain while go getting a dependency"
)]
pub struct CliArgs {
    /// Module reference: github.com/<org>/<repo>/<module_version>@<tag>
    pub module: String,

    /// Further positional arguments are accepted and ignored
    #[arg(hide = true)]
    pub ignored: Vec<String>,

    /// Places a comment above the require statement to show what project
    /// version the commit sha is pointing to
    #[arg(long)]
    pub comment: bool,

    /// go.mod file to annotate; `go get` runs in its directory
    #[arg(long, default_value = DEFAULT_MANIFEST)]
    pub manifest: PathBuf,

    /// Program providing the `get` subcommand
    #[arg(long, default_value = DEFAULT_GO_PROGRAM)]
    pub go_bin: String,

    /// GitHub API base URL
    #[arg(long, default_value = GITHUB_API_URL)]
    pub api_url: String,

    /// HTTP timeout in seconds
    #[arg(long, value_parser = parse_timeout, default_value = "30")]
    pub timeout: Duration,

    // Output options
    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable quiet mode - no spinner or summary
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output the pinned revision in JSON format
    #[arg(long)]
    pub json: bool,
}

impl CliArgs {
    /// Directory `go get` runs in: the directory holding the manifest
    pub fn working_dir(&self) -> &Path {
        match self.manifest.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        }
    }

    /// Whether the spinner should be shown
    pub fn show_progress(&self) -> bool {
        !self.quiet && !self.json
    }
}
