//! Crate-wide error hierarchy for git-url-patterns.
//!
//! None of these errors reach a documentation build: the public builders
//! turn every failure into an empty URL. They exist so the builders can use
//! `?` internally and so callers can log why a link was not produced.

use thiserror::Error;

/// Convenient alias for crate-wide results.
pub type GitUrlResult<T> = Result<T, GitUrlError>;

/// Root error type for the git-url-patterns crate.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GitUrlError {
    /// One of `repo`, `branch` or `path` is absent or empty.
    #[error("missing remote field: {0}")]
    MissingField(&'static str),

    /// No provider pattern matched the repository URL.
    #[error("unknown git provider for repo: {0}")]
    UnknownProvider(String),

    /// A pinned pattern name is not one of the known providers.
    #[error("unknown git url pattern: {0}")]
    UnknownPattern(String),

    /// Operation is not supported by this provider.
    #[error("unsupported provider operation")]
    Unsupported,
}
