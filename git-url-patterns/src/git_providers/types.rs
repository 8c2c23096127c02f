//! Provider identifiers and the page context a URL builder may consult.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::GitUrlError;

/// Supported git and wiki hosting providers, in detection order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    GitHub,
    AzureReposGit,
    Bitbucket,
    AzureWiki,
}

impl ProviderKind {
    /// All providers in the order detection tries them.
    pub const ALL: [ProviderKind; 4] = [
        ProviderKind::GitHub,
        ProviderKind::AzureReposGit,
        ProviderKind::Bitbucket,
        ProviderKind::AzureWiki,
    ];

    /// Pattern name used by DocFX templates (`gitUrlPattern`).
    pub fn pattern_name(self) -> &'static str {
        match self {
            Self::GitHub => "github",
            Self::AzureReposGit => "vso",
            Self::Bitbucket => "bitbucket",
            Self::AzureWiki => "adowiki",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.pattern_name())
    }
}

impl FromStr for ProviderKind {
    type Err = GitUrlError;

    /// Case-insensitive; accepts the template names and the long names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "github" => Ok(Self::GitHub),
            "vso" | "azurereposgit" => Ok(Self::AzureReposGit),
            "bitbucket" => Ok(Self::Bitbucket),
            "adowiki" | "azurewiki" => Ok(Self::AzureWiki),
            _ => Err(GitUrlError::UnknownPattern(s.to_string())),
        }
    }
}

/// Page fields that influence URL rendering beyond the remote itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageContext<'a> {
    /// Wiki page path taken verbatim for Azure wiki links (`adoWikiPath`).
    pub ado_wiki_path: Option<&'a str>,
}
