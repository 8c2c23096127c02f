//! Host-wide annotator settings loaded from environment variables.
//!
//! # Environment variables
//!
//! - `DOCFX_GIT_URL_PATTERN` = pin every page to one provider (`github`,
//!   `vso`, `bitbucket`, `adowiki`); unknown names fall back to detection
//! - `DOCFX_API_SPEC_FOLDER` = default folder for new API override files
//!   (`apiSpec` when unset; `_gitContribute.apiSpecFolder` still wins)

use git_url_patterns::parser::DEFAULT_API_SPEC_FOLDER;

use crate::error_handler::{Result, opt_env};

pub const GIT_URL_PATTERN_VAR: &str = "DOCFX_GIT_URL_PATTERN";
pub const API_SPEC_FOLDER_VAR: &str = "DOCFX_API_SPEC_FOLDER";

/// Settings shared by every page of a build.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnnotatorConfig {
    /// Provider name pinned by the host, if any.
    pub git_url_pattern: Option<String>,
    /// Folder proposed for new API override files.
    pub api_spec_folder: String,
}

impl Default for AnnotatorConfig {
    fn default() -> Self {
        Self {
            git_url_pattern: None,
            api_spec_folder: DEFAULT_API_SPEC_FOLDER.to_string(),
        }
    }
}

impl AnnotatorConfig {
    /// Loads the config from the process environment.
    ///
    /// # Errors
    /// Returns a config error when a variable holds non UTF-8 data.
    pub fn from_env() -> Result<Self> {
        let git_url_pattern = opt_env(GIT_URL_PATTERN_VAR)?;
        let api_spec_folder =
            opt_env(API_SPEC_FOLDER_VAR)?.unwrap_or_else(|| DEFAULT_API_SPEC_FOLDER.to_string());

        Ok(Self {
            git_url_pattern,
            api_spec_folder,
        })
    }

    /// Pins the provider name.
    pub fn with_git_url_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.git_url_pattern = Some(pattern.into());
        self
    }
}
