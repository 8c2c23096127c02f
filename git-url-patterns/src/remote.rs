//! Remote descriptors and the override/fallback merge that normalizes them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{GitUrlError, GitUrlResult};
use crate::parser::DEFAULT_API_SPEC_FOLDER;

/// Git location of a page as written into the page metadata
/// (`source.remote`, `documentation.remote`, `_docfxHelper.remote`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitRemote {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relative_path: Option<String>,
    /// Keys this crate does not interpret, kept for the host.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Caller-supplied partial remote (`_gitContribute`) that wins over the
/// page's own remote key by key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverrideDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relative_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_spec_folder: Option<String>,
    /// Base URL of an Azure DevOps wiki, e.g.
    /// `https://dev.azure.com/{org}/{project}/_wiki/wikis/{wiki}`.
    #[serde(
        rename = "AdoWikiUri",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub ado_wiki_uri: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Normalized remote handed to the URL builders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteDescriptor {
    pub repo: Option<String>,
    pub branch: Option<String>,
    pub path: Option<String>,
    pub relative_path: Option<String>,
    /// One-based line for anchors; `None` or `<= 0` means no anchor.
    pub start_line: Option<i64>,
    pub api_spec_folder: String,
}

impl Default for RemoteDescriptor {
    fn default() -> Self {
        Self {
            repo: None,
            branch: None,
            path: None,
            relative_path: None,
            start_line: None,
            api_spec_folder: DEFAULT_API_SPEC_FOLDER.to_string(),
        }
    }
}

impl RemoteDescriptor {
    /// Sets the one-based start line used for anchors.
    pub fn with_start_line(mut self, start_line: Option<i64>) -> Self {
        self.start_line = start_line;
        self
    }

    /// Borrows `repo`, `branch` and `path`, failing on the first one that is
    /// missing or empty.
    pub fn required_parts(&self) -> GitUrlResult<(&str, &str, &str)> {
        let repo = non_empty(&self.repo).ok_or(GitUrlError::MissingField("repo"))?;
        let branch = non_empty(&self.branch).ok_or(GitUrlError::MissingField("branch"))?;
        let path = non_empty(&self.path).ok_or(GitUrlError::MissingField("path"))?;
        Ok((repo, branch, path))
    }

    /// Anchor line when it is a positive number.
    pub fn anchor_line(&self) -> Option<i64> {
        self.start_line.filter(|line| *line > 0)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn pick(
    overridden: Option<&Option<String>>,
    fallback: Option<&Option<String>>,
) -> Option<String> {
    overridden
        .and_then(Option::clone)
        .or_else(|| fallback.and_then(Option::clone))
}

/// Merges an override descriptor with the page's remote.
#[derive(Debug, Clone)]
pub struct RemoteInfoResolver {
    default_api_spec_folder: String,
}

impl Default for RemoteInfoResolver {
    fn default() -> Self {
        Self::new(DEFAULT_API_SPEC_FOLDER)
    }
}

impl RemoteInfoResolver {
    /// Creates a resolver with a host-wide default API override folder.
    pub fn new(default_api_spec_folder: impl Into<String>) -> Self {
        Self {
            default_api_spec_folder: default_api_spec_folder.into(),
        }
    }

    /// Key-by-key merge: a key present on `overrides` wins, otherwise the
    /// `fallback` value is used, otherwise the key stays absent.
    pub fn merge(
        &self,
        overrides: Option<&OverrideDescriptor>,
        fallback: Option<&GitRemote>,
    ) -> RemoteDescriptor {
        let api_spec_folder = overrides
            .and_then(|o| o.api_spec_folder.clone())
            .filter(|folder| !folder.is_empty())
            .unwrap_or_else(|| self.default_api_spec_folder.clone());

        RemoteDescriptor {
            repo: pick(overrides.map(|o| &o.repo), fallback.map(|f| &f.repo)),
            branch: pick(overrides.map(|o| &o.branch), fallback.map(|f| &f.branch)),
            path: pick(overrides.map(|o| &o.path), fallback.map(|f| &f.path)),
            relative_path: pick(
                overrides.map(|o| &o.relative_path),
                fallback.map(|f| &f.relative_path),
            ),
            start_line: None,
            api_spec_folder,
        }
    }
}

/// Merge with the built-in `apiSpec` default folder.
pub fn merge(
    overrides: Option<&OverrideDescriptor>,
    fallback: Option<&GitRemote>,
) -> RemoteDescriptor {
    RemoteInfoResolver::default().merge(overrides, fallback)
}
