//! Application error types using thiserror
//!
//! Error hierarchy:
//! - ReferenceError: Malformed module reference
//! - RegistryError: Failures talking to the tag listing API
//! - FetchError: `go get` could not be spawned or exited non-zero
//! - ManifestError: go.mod read, parse or write failures

use std::path::PathBuf;
use thiserror::Error;

/// Usage message shown for any reference that does not match the expected shape
pub const FORMAT_USAGE: &str = "format must be github.com/<org>/<repo>/<module_version>@<tag>";

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Module reference related errors
    #[error(transparent)]
    Reference(#[from] ReferenceError),

    /// Tag resolution related errors
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Package manager invocation errors
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Manifest annotation errors
    #[error(transparent)]
    Manifest(#[from] ManifestError),
}

/// Errors related to parsing the module reference
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ReferenceError {
    /// Input does not look like github.com/<org>/<repo>/<vN>@<tag>
    #[error("{}", FORMAT_USAGE)]
    InvalidFormat { input: String },
}

/// Errors related to the tag listing API
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Repository not found
    #[error("repository '{repository}' not found on {registry}")]
    NotFound {
        repository: String,
        registry: String,
    },

    /// Network request failed
    #[error("failed to list tags of '{repository}' from {registry}: {message}")]
    NetworkError {
        repository: String,
        registry: String,
        message: String,
    },

    /// Rate limit exceeded
    #[error("rate limit exceeded for {registry}")]
    RateLimitExceeded { registry: String },

    /// Invalid response from the API
    #[error("invalid response from {registry} for '{repository}': {message}")]
    InvalidResponse {
        repository: String,
        registry: String,
        message: String,
    },

    /// Timeout
    #[error("timeout while listing tags of '{repository}' from {registry}")]
    Timeout {
        repository: String,
        registry: String,
    },
}

/// Errors related to running the package manager
#[derive(Error, Debug)]
pub enum FetchError {
    /// The program could not be started at all
    #[error("error while running command \"{command}\": {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The program ran but exited unsuccessfully
    #[error("error while running command \"{command}\": {status}")]
    CommandFailed { command: String, status: String },
}

/// Errors related to manifest annotation
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Failed to read manifest file
    #[error("failed to read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// go.mod parsing error
    #[error("failed to parse {path}:{line}: {message}")]
    ParseError {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// Could not move the manifest aside before rewriting it
    #[error("failed to backup {path}: {source}")]
    BackupError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write manifest file
    #[error("failed to write {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Write failed and the backup could not be moved back
    #[error("failed to write {path}: {source}; original content left in {backup}")]
    RestoreError {
        path: PathBuf,
        backup: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AppError {
    /// Static context printed in front of the error at the top level
    ///
    /// Format and fetch errors already read as complete sentences.
    pub fn context(&self) -> Option<&'static str> {
        match self {
            AppError::Reference(_) | AppError::Fetch(_) => None,
            AppError::Registry(_) => Some("failed to get sha"),
            AppError::Manifest(_) => Some("error adding comment to go.mod"),
        }
    }
}

impl ReferenceError {
    /// Creates a new InvalidFormat error
    pub fn invalid_format(input: impl Into<String>) -> Self {
        ReferenceError::InvalidFormat {
            input: input.into(),
        }
    }
}

impl RegistryError {
    /// Creates a new NotFound error
    pub fn not_found(repository: impl Into<String>, registry: impl Into<String>) -> Self {
        RegistryError::NotFound {
            repository: repository.into(),
            registry: registry.into(),
        }
    }

    /// Creates a new NetworkError
    pub fn network_error(
        repository: impl Into<String>,
        registry: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        RegistryError::NetworkError {
            repository: repository.into(),
            registry: registry.into(),
            message: message.into(),
        }
    }

    /// Creates a new RateLimitExceeded error
    pub fn rate_limit_exceeded(registry: impl Into<String>) -> Self {
        RegistryError::RateLimitExceeded {
            registry: registry.into(),
        }
    }

    /// Creates a new InvalidResponse error
    pub fn invalid_response(
        repository: impl Into<String>,
        registry: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        RegistryError::InvalidResponse {
            repository: repository.into(),
            registry: registry.into(),
            message: message.into(),
        }
    }

    /// Creates a new Timeout error
    pub fn timeout(repository: impl Into<String>, registry: impl Into<String>) -> Self {
        RegistryError::Timeout {
            repository: repository.into(),
            registry: registry.into(),
        }
    }
}

impl ManifestError {
    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new WriteError
    pub fn write_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::WriteError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new ParseError
    pub fn parse_error(path: impl Into<PathBuf>, line: usize, message: impl Into<String>) -> Self {
        ManifestError::ParseError {
            path: path.into(),
            line,
            message: message.into(),
        }
    }
}
