//! Azure DevOps wiki page URLs.
//!
//! Wiki URL form: `https://dev.azure.com/{org}/{project}/_wiki/wikis/{wiki}`
//! Generated URL: `{wiki}?pagePath=/Foo/Bar`

use lazy_static::lazy_static;
use regex::Regex;

use crate::errors::GitUrlResult;
use crate::git_providers::types::PageContext;
use crate::parser::{normalize_to_https, wiki_page_path};
use crate::remote::RemoteDescriptor;

lazy_static! {
    pub(crate) static ref REPO_PATTERN: Regex = Regex::new(
        r"(?i)^(https?://)?(ssh://)?(\S+@)?(\S+\.)?(dev\.azure|visualstudio)\.com(:[0-9]+)?(/|:)\S*/_wiki/wikis/.*"
    )
    .unwrap();
}

/// Web URL of a wiki page. Line anchors are not supported by wikis.
///
/// `page.ado_wiki_path` is used verbatim when set; otherwise the page path is
/// derived from the remote path (see [`wiki_page_path`]).
pub fn view_url(remote: &RemoteDescriptor, page: &PageContext<'_>) -> GitUrlResult<String> {
    let (repo, _, path) = remote.required_parts()?;

    let page_path = match page.ado_wiki_path.filter(|p| !p.is_empty()) {
        Some(explicit) => explicit.to_string(),
        None => wiki_page_path(path, remote.relative_path.as_deref()),
    };
    Ok(format!("{}?pagePath={page_path}", normalize_to_https(repo)))
}

/// Wiki page URL built straight from a wiki base URI.
pub fn page_url(wiki_uri: &str, page_path: &str) -> String {
    format!("{wiki_uri}?pagePath={page_path}")
}
