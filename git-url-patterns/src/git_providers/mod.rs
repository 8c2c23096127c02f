//! Provider table without dynamic trait objects.
//!
//! Every provider module exposes a detection regex and the URL builders it
//! supports; `ProviderKind` dispatches to them with a `match`. The
//! `UrlPatternRegistry` adds the host-wide pinned provider and turns builder
//! errors into empty URLs.

pub mod types;
pub use types::*;

pub mod azure_repos;
pub mod azure_wiki;
pub mod bitbucket;
pub mod github;

use tracing::debug;

use crate::errors::{GitUrlError, GitUrlResult};
use crate::remote::RemoteDescriptor;

impl ProviderKind {
    /// True when `repo_url` has the shape of this provider's clone URLs.
    pub fn matches(self, repo_url: &str) -> bool {
        match self {
            Self::GitHub => github::REPO_PATTERN.is_match(repo_url),
            Self::AzureReposGit => azure_repos::REPO_PATTERN.is_match(repo_url),
            Self::Bitbucket => bitbucket::REPO_PATTERN.is_match(repo_url),
            Self::AzureWiki => azure_wiki::REPO_PATTERN.is_match(repo_url),
        }
    }

    /// Renders the "view this file/line" URL for this provider.
    pub fn view_url(
        self,
        remote: &RemoteDescriptor,
        page: &PageContext<'_>,
    ) -> GitUrlResult<String> {
        match self {
            Self::GitHub => github::view_url(remote),
            Self::AzureReposGit => azure_repos::view_url(remote),
            Self::Bitbucket => bitbucket::view_url(remote),
            Self::AzureWiki => azure_wiki::view_url(remote, page),
        }
    }

    /// Renders the "create a new file" URL. Only GitHub supports it.
    pub fn new_file_url(self, remote: &RemoteDescriptor, uid: &str) -> GitUrlResult<String> {
        match self {
            Self::GitHub => github::new_file_url(remote, uid),
            Self::AzureReposGit | Self::Bitbucket | Self::AzureWiki => {
                Err(GitUrlError::Unsupported)
            }
        }
    }
}

/// Classifies repository URLs and renders provider URLs for them.
#[derive(Debug, Clone, Copy, Default)]
pub struct UrlPatternRegistry {
    pinned: Option<ProviderKind>,
}

impl UrlPatternRegistry {
    /// Registry that always runs detection.
    pub fn new() -> Self {
        Self { pinned: None }
    }

    /// Registry with a host-pinned provider.
    ///
    /// Unknown or empty names are ignored and detection is used instead.
    pub fn with_pinned_pattern(name: Option<&str>) -> Self {
        let pinned = name
            .filter(|n| !n.trim().is_empty())
            .and_then(|n| match n.parse::<ProviderKind>() {
                Ok(kind) => Some(kind),
                Err(err) => {
                    debug!(error = %err, "ignoring pinned git url pattern");
                    None
                }
            });
        Self { pinned }
    }

    /// Provider pinned by the host, if any.
    pub fn pinned(&self) -> Option<ProviderKind> {
        self.pinned
    }

    /// First provider, in [`ProviderKind::ALL`] order, whose pattern matches.
    pub fn detect(repo_url: &str) -> Option<ProviderKind> {
        ProviderKind::ALL
            .into_iter()
            .find(|kind| kind.matches(repo_url))
    }

    /// Pinned provider if set, otherwise the detected one.
    pub fn resolve(&self, repo_url: &str) -> Option<ProviderKind> {
        self.pinned.or_else(|| Self::detect(repo_url))
    }

    /// Fallible form of [`Self::view_url`].
    pub fn try_view_url(
        &self,
        remote: &RemoteDescriptor,
        page: &PageContext<'_>,
    ) -> GitUrlResult<String> {
        let (repo, _, _) = remote.required_parts()?;
        let kind = self
            .resolve(repo)
            .ok_or_else(|| GitUrlError::UnknownProvider(repo.to_string()))?;
        debug!(provider = %kind, repo, "rendering view url");
        kind.view_url(remote, page)
    }

    /// "View source" / "edit this page" URL, or `""` when it cannot be built.
    pub fn view_url(&self, remote: &RemoteDescriptor, page: &PageContext<'_>) -> String {
        self.try_view_url(remote, page).unwrap_or_else(|err| {
            debug!(error = %err, "no view url");
            String::new()
        })
    }

    /// Fallible form of [`Self::new_file_url`].
    pub fn try_new_file_url(&self, remote: &RemoteDescriptor, uid: &str) -> GitUrlResult<String> {
        let (repo, _, _) = remote.required_parts()?;
        let kind = self
            .resolve(repo)
            .ok_or_else(|| GitUrlError::UnknownProvider(repo.to_string()))?;
        debug!(provider = %kind, repo, uid, "rendering new file url");
        kind.new_file_url(remote, uid)
    }

    /// "Contribute a new file" URL, or `""` when it cannot be built.
    pub fn new_file_url(&self, remote: &RemoteDescriptor, uid: &str) -> String {
        self.try_new_file_url(remote, uid).unwrap_or_else(|err| {
            debug!(error = %err, "no new file url");
            String::new()
        })
    }
}
