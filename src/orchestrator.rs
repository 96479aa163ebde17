//! Pin orchestrator for coordinating the entire workflow
//!
//! This module provides:
//! - Workflow coordination: parse → resolve → go get → annotate
//! - Verbose diagnostics on stderr
//! - Injection points for the resolver and package manager (for testing)
//!
//! Every step waits for the previous one. The first failure ends the run;
//! in particular a failed `go get` never reaches the manifest.

use crate::cli::CliArgs;
use crate::domain::{ModuleReference, ResolvedCommit};
use crate::error::AppError;
use crate::manifest::ManifestAnnotator;
use crate::package_manager::{PackageManagerRunner, SystemPackageManager};
use crate::parser::parse_reference;
use crate::progress::Progress;
use crate::registry::{GitHubTagsAdapter, HttpClient, TagResolver};
use colored::Colorize;
use std::path::PathBuf;

/// Orchestrator for coordinating the pin workflow
pub struct Orchestrator {
    /// CLI arguments for configuration
    args: CliArgs,
    /// Resolves the requested tag to a revision
    resolver: Box<dyn TagResolver>,
    /// Runs `go get`
    runner: Box<dyn PackageManagerRunner>,
    /// Rewrites the manifest when `--comment` is set
    annotator: ManifestAnnotator,
}

/// Result of a successful run
#[derive(Debug, Clone)]
pub struct PinOutcome {
    /// The module reference that was requested
    pub module: ModuleReference,
    /// The revision that was pinned
    pub resolved: ResolvedCommit,
    /// Manifest that received the annotation, if any
    pub annotated: Option<PathBuf>,
}

impl PinOutcome {
    /// The `<path>@<revision>` argument handed to `go get`
    pub fn target(&self) -> String {
        self.module.pinned(self.resolved.as_str())
    }
}

impl Orchestrator {
    /// Create a new orchestrator with the given CLI arguments
    pub fn new(args: CliArgs) -> Result<Self, AppError> {
        let client = HttpClient::with_timeout(args.timeout)?;
        let resolver = GitHubTagsAdapter::with_base_url(client, args.api_url.clone());
        let runner = SystemPackageManager::with_program(args.go_bin.clone());

        Ok(Self::with_components(
            args,
            Box::new(resolver),
            Box::new(runner),
        ))
    }

    /// Create an orchestrator with custom components (for testing)
    pub fn with_components(
        args: CliArgs,
        resolver: Box<dyn TagResolver>,
        runner: Box<dyn PackageManagerRunner>,
    ) -> Self {
        let annotator = ManifestAnnotator::new(&args.manifest);
        Self {
            args,
            resolver,
            runner,
            annotator,
        }
    }

    /// Run the pin workflow
    pub async fn run(&self) -> Result<PinOutcome, AppError> {
        self.run_with_progress(self.args.show_progress()).await
    }

    /// Run the pin workflow with optional progress display
    pub async fn run_with_progress(&self, show_progress: bool) -> Result<PinOutcome, AppError> {
        let mut progress = Progress::new(show_progress);

        // Step 1: Parse the module reference
        let module = parse_reference(&self.args.module)?;
        self.log(&format!(
            "module {} (repository {}, tag {})",
            module.path(),
            module.repository(),
            module.tag
        ));

        // Step 2: Resolve the tag
        progress.spinner(&format!(
            "Resolving {} on {}...",
            module.tag,
            self.resolver.registry_name()
        ));
        let resolved = self.resolver.resolve(&module).await;
        progress.finish_and_clear();
        let resolved = resolved?;

        if resolved.is_from_tag() {
            self.log(&format!("tag {} points at {}", module.tag, resolved));
        } else {
            self.log(&format!(
                "tag {} not found in the first page of tags, using it as-is",
                module.tag
            ));
        }

        // Step 3: Fetch the pinned module
        let target = module.pinned(resolved.as_str());
        let working_dir = self.args.working_dir();
        self.log(&format!(
            "running {} {} in {}",
            self.runner.command_name(),
            target,
            working_dir.display()
        ));
        self.runner.run_get(&target, working_dir)?;

        // Step 4: Annotate the manifest
        let annotated = if self.args.comment {
            let manifest = self.annotator.path();
            self.log(&format!("annotating {}", manifest.display()));
            if self.annotator.annotate(&module, &resolved)? {
                Some(manifest.to_path_buf())
            } else {
                self.log(&format!(
                    "{} has no require entry for {}, left unchanged",
                    manifest.display(),
                    module.path()
                ));
                None
            }
        } else {
            None
        };

        Ok(PinOutcome {
            module,
            resolved,
            annotated,
        })
    }

    /// Print a diagnostic line in verbose mode
    fn log(&self, message: &str) {
        if self.args.verbose {
            eprintln!("{} {}", "mmgoget:".dimmed(), message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{FetchError, RegistryError};
    use async_trait::async_trait;
    use clap::Parser;
    use std::fs;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    const GO_MOD: &str = "module example.com/app\n\ngo 1.21\n\nrequire github.com/acme/widgets/v3 v3.0.0\n";

    /// Resolver returning a fixed tag listing outcome
    struct MockResolver {
        sha: Option<&'static str>,
        fail: bool,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl TagResolver for MockResolver {
        fn registry_name(&self) -> &'static str {
            "mock"
        }

        async fn resolve(
            &self,
            module: &ModuleReference,
        ) -> Result<ResolvedCommit, RegistryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(RegistryError::rate_limit_exceeded("mock"));
            }
            Ok(match self.sha {
                Some(sha) => ResolvedCommit::from_sha(sha),
                None => ResolvedCommit::fallback(&module.tag),
            })
        }
    }

    /// Runner recording its targets
    struct MockRunner {
        should_succeed: bool,
        targets: Arc<Mutex<Vec<String>>>,
    }

    impl PackageManagerRunner for MockRunner {
        fn run_get(&self, target: &str, _working_dir: &Path) -> Result<(), FetchError> {
            self.targets.lock().unwrap().push(target.to_string());
            if self.should_succeed {
                Ok(())
            } else {
                Err(FetchError::CommandFailed {
                    command: self.command_name(),
                    status: "exit status: 1".to_string(),
                })
            }
        }

        fn command_name(&self) -> String {
            "go get".to_string()
        }
    }

    struct Harness {
        orchestrator: Orchestrator,
        resolver_calls: Arc<AtomicUsize>,
        targets: Arc<Mutex<Vec<String>>>,
    }

    fn harness(
        argv: &[&str],
        sha: Option<&'static str>,
        resolve_fails: bool,
        fetch_succeeds: bool,
    ) -> Harness {
        let resolver_calls = Arc::new(AtomicUsize::new(0));
        let targets = Arc::new(Mutex::new(Vec::new()));

        let mut full = vec!["mmgoget", "--quiet"];
        full.extend_from_slice(argv);
        let args = CliArgs::parse_from(full);

        let orchestrator = Orchestrator::with_components(
            args,
            Box::new(MockResolver {
                sha,
                fail: resolve_fails,
                calls: Arc::clone(&resolver_calls),
            }),
            Box::new(MockRunner {
                should_succeed: fetch_succeeds,
                targets: Arc::clone(&targets),
            }),
        );

        Harness {
            orchestrator,
            resolver_calls,
            targets,
        }
    }

    fn go_mod_in(dir: &TempDir) -> String {
        let path = dir.path().join("go.mod");
        fs::write(&path, GO_MOD).unwrap();
        path.to_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_pins_resolved_sha() {
        let h = harness(
            &["github.com/acme/widgets/v3@v1.2.0"],
            Some("abcdef1234567890"),
            false,
            true,
        );

        let outcome = h.orchestrator.run().await.unwrap();

        assert_eq!(outcome.resolved.as_str(), "abcdef1234");
        assert_eq!(outcome.target(), "github.com/acme/widgets/v3@abcdef1234");
        assert!(outcome.annotated.is_none());
        assert_eq!(
            h.targets.lock().unwrap().as_slice(),
            ["github.com/acme/widgets/v3@abcdef1234"]
        );
    }

    #[tokio::test]
    async fn test_missing_tag_passed_verbatim() {
        let h = harness(&["github.com/acme/widgets/v3@v9.9.9"], None, false, true);

        let outcome = h.orchestrator.run().await.unwrap();

        assert!(!outcome.resolved.is_from_tag());
        assert_eq!(
            h.targets.lock().unwrap().as_slice(),
            ["github.com/acme/widgets/v3@v9.9.9"]
        );
    }

    #[tokio::test]
    async fn test_invalid_reference_does_no_io() {
        let h = harness(&["github.com/acme/widgets@v1.2.0"], None, false, true);

        let err = h.orchestrator.run().await.unwrap_err();

        assert!(matches!(err, AppError::Reference(_)));
        assert_eq!(h.resolver_calls.load(Ordering::SeqCst), 0);
        assert!(h.targets.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_resolution_failure_stops_before_fetch() {
        let h = harness(&["github.com/acme/widgets/v3@v1.2.0"], None, true, true);

        let err = h.orchestrator.run().await.unwrap_err();

        assert!(matches!(err, AppError::Registry(_)));
        assert!(h.targets.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_failure_leaves_manifest_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let manifest = go_mod_in(&temp_dir);
        let h = harness(
            &[
                "--comment",
                "--manifest",
                manifest.as_str(),
                "github.com/acme/widgets/v3@v1.2.0",
            ],
            Some("abcdef1234567890"),
            false,
            false,
        );

        let err = h.orchestrator.run().await.unwrap_err();

        assert!(matches!(err, AppError::Fetch(_)));
        assert_eq!(fs::read_to_string(&manifest).unwrap(), GO_MOD);
    }

    #[tokio::test]
    async fn test_comment_annotates_manifest() {
        let temp_dir = TempDir::new().unwrap();
        let manifest = go_mod_in(&temp_dir);
        let h = harness(
            &[
                "--comment",
                "--manifest",
                manifest.as_str(),
                "github.com/acme/widgets/v3@v1.2.0",
            ],
            Some("abcdef1234567890"),
            false,
            true,
        );

        let outcome = h.orchestrator.run().await.unwrap();

        assert_eq!(outcome.annotated, Some(PathBuf::from(&manifest)));
        let content = fs::read_to_string(&manifest).unwrap();
        assert!(content.contains(
            "// mmgoget: github.com/acme/widgets/v3@v1.2.0 is replaced by -> github.com/acme/widgets/v3@abcdef1234\nrequire github.com/acme/widgets/v3 v3.0.0"
        ));
    }

    #[tokio::test]
    async fn test_annotation_failure_is_manifest_error() {
        let temp_dir = TempDir::new().unwrap();
        let manifest = temp_dir.path().join("go.mod");
        let h = harness(
            &[
                "--comment",
                "--manifest",
                manifest.to_str().unwrap(),
                "github.com/acme/widgets/v3@v1.2.0",
            ],
            Some("abcdef1234567890"),
            false,
            true,
        );

        let err = h.orchestrator.run().await.unwrap_err();

        assert!(matches!(err, AppError::Manifest(_)));
        assert_eq!(err.context(), Some("error adding comment to go.mod"));
    }

    #[tokio::test]
    async fn test_comment_without_matching_require_succeeds() {
        let temp_dir = TempDir::new().unwrap();
        let manifest = temp_dir.path().join("go.mod");
        let content = "module example.com/app\n\ngo 1.21\n";
        fs::write(&manifest, content).unwrap();
        let h = harness(
            &[
                "--comment",
                "--manifest",
                manifest.to_str().unwrap(),
                "github.com/acme/widgets/v3@v1.2.0",
            ],
            Some("abcdef1234567890"),
            false,
            true,
        );

        let outcome = h.orchestrator.run().await.unwrap();

        assert!(outcome.annotated.is_none());
        assert_eq!(h.targets.lock().unwrap().len(), 1);
        assert_eq!(fs::read_to_string(&manifest).unwrap(), content);
    }

    #[test]
    fn test_new_builds_real_components() {
        let args = CliArgs::parse_from(["mmgoget", "github.com/acme/widgets/v3@v1.2.0"]);
        let orchestrator = Orchestrator::new(args).unwrap();
        assert_eq!(orchestrator.resolver.registry_name(), "GitHub");
        assert_eq!(orchestrator.runner.command_name(), "go get");
        assert_eq!(orchestrator.annotator.path(), Path::new("go.mod"));
    }
}
