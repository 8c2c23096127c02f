//! Unified error handling for `page-annotator`.
//!
//! The page hooks themselves never fail: a link that cannot be computed is
//! simply left unset. Errors only come from the edges, namely loading the
//! configuration from the environment and decoding/encoding raw JSON models.

use thiserror::Error;

/* ------------------------------------------------------------------------- */
/* Public result alias                                                       */
/* ------------------------------------------------------------------------- */

/// Unified result alias for the entire crate.
pub type Result<T> = std::result::Result<T, AnnotatorError>;

/* ------------------------------------------------------------------------- */
/* Top-level error                                                           */
/* ------------------------------------------------------------------------- */

/// Top-level error for the `page-annotator` crate.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum AnnotatorError {
    /// Configuration could not be read.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A page model was not valid JSON or not shaped like a page model.
    #[error("[DocFxHelper] invalid page model json: {0}")]
    Json(#[from] serde_json::Error),

    /// The JSON document was neither an object nor an array of objects.
    #[error("[DocFxHelper] expected a page model object or an array of them")]
    UnexpectedShape,
}

/* ------------------------------------------------------------------------- */
/* Config errors                                                             */
/* ------------------------------------------------------------------------- */

/// Error enum for environment-driven setup.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Value had the wrong format.
    #[error("[DocFxHelper] invalid format in {var}: {reason}")]
    InvalidFormat {
        /// Variable name (e.g., `DOCFX_GIT_URL_PATTERN`).
        var: &'static str,
        /// Explanation (e.g., `must be valid UTF-8`).
        reason: &'static str,
    },
}

/* ------------------------------------------------------------------------- */
/* Env helpers                                                               */
/* ------------------------------------------------------------------------- */

/// Reads an optional environment variable (`Ok(None)` if unset or blank).
///
/// # Errors
/// Returns [`ConfigError::InvalidFormat`] when the value is not valid UTF-8.
pub fn opt_env(name: &'static str) -> Result<Option<String>> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => Ok(Some(v.trim().to_string())),
        Ok(_) | Err(std::env::VarError::NotPresent) => Ok(None),
        Err(std::env::VarError::NotUnicode(_)) => Err(ConfigError::InvalidFormat {
            var: name,
            reason: "must be valid UTF-8",
        }
        .into()),
    }
}
