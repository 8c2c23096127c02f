//! Bitbucket Cloud web URLs.
//!
//! Clone URL forms:
//!   * HTTPS: `https://{user}@bitbucket.org/{org}/{repo}.git`
//!   * SSH:   `git@bitbucket.org:{org}/{repo}.git`
//!
//! Generated URL: `https://bitbucket.org/{org}/{repo}/src/{branch}/{path}#lines-{line}`

use lazy_static::lazy_static;
use regex::Regex;

use crate::errors::GitUrlResult;
use crate::parser::{normalize_to_https, strip_dot_git_suffix};
use crate::remote::RemoteDescriptor;

lazy_static! {
    pub(crate) static ref REPO_PATTERN: Regex =
        Regex::new(r"(?i)^(https?://)?(\S+@)?(\S+\.)?bitbucket\.org(/|:).*").unwrap();
}

/// Web URL of a file (and optional line) on a branch.
pub fn view_url(remote: &RemoteDescriptor) -> GitUrlResult<String> {
    let (repo, branch, path) = remote.required_parts()?;

    let repo = normalize_to_https(repo);
    let mut url = format!("{}/src/{branch}/{path}", strip_dot_git_suffix(&repo));
    if let Some(line) = remote.anchor_line() {
        url.push_str(&format!("#lines-{line}"));
    }
    Ok(url)
}
