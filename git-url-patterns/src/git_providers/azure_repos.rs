//! Azure DevOps (Azure Repos) git web URLs.
//!
//! Clone URL forms:
//!   * `https://{account}@dev.azure.com/{account}/{project}/_git/{repo}`
//!   * `https://{user}.visualstudio.com/{org}/_git/{repo}`
//!   * `ssh://{user}@{user}.visualstudio.com:22/{org}/_git/{repo}`
//!
//! Generated URLs:
//!   * branch:        `{repo}?path={path}&version=GB{branch}`
//!   * detached HEAD: `{repo}?path={path}&version=GC{commit}`

use lazy_static::lazy_static;
use regex::Regex;

use crate::errors::GitUrlResult;
use crate::parser::{is_commit_sha, normalize_to_https};
use crate::remote::RemoteDescriptor;

lazy_static! {
    // `/_git/` separates code repositories from wikis on the same hosts.
    pub(crate) static ref REPO_PATTERN: Regex = Regex::new(
        r"(?i)^(https?://)?(ssh://)?(\S+@)?(\S+\.)?(dev\.azure|visualstudio)\.com(:[0-9]+)?(/|:)\S*/_git/.*"
    )
    .unwrap();
}

/// Web URL of a file (and optional line) at a branch or commit.
pub fn view_url(remote: &RemoteDescriptor) -> GitUrlResult<String> {
    let (repo, branch, path) = remote.required_parts()?;

    let version_prefix = if is_commit_sha(branch) { "GC" } else { "GB" };
    let mut url = format!(
        "{}?path={path}&version={version_prefix}{branch}",
        normalize_to_https(repo)
    );
    if let Some(line) = remote.anchor_line() {
        url.push_str(&format!("&line={line}"));
    }
    Ok(url)
}
