//! Translates git remote descriptors (clone URL, branch, path) into web URLs
//! for GitHub, Azure Repos, Bitbucket and Azure DevOps wikis.
//!
//! The entry point is [`UrlPatternRegistry`]; remotes are normalized with
//! [`RemoteInfoResolver`] before rendering.

mod errors;
pub mod git_providers;
pub mod parser;
pub mod remote;

pub use errors::{GitUrlError, GitUrlResult};
pub use git_providers::{PageContext, ProviderKind, UrlPatternRegistry};
pub use parser::html_id;
pub use remote::{GitRemote, OverrideDescriptor, RemoteDescriptor, RemoteInfoResolver, merge};
