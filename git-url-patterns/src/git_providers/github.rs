//! GitHub web URLs.
//!
//! Clone URL forms:
//!   * HTTPS: `https://github.com/{org}/{repo}.git`
//!   * SSH:   `git@github.com:{org}/{repo}.git`
//!
//! Generated URLs:
//!   * view:     `https://github.com/{org}/{repo}/blob/{branch}/{path}/#L{line}`
//!   * new file: `https://github.com/{org}/{repo}/new/{branch}/{folder}/new?filename=...`

use lazy_static::lazy_static;
use regex::Regex;

use crate::errors::GitUrlResult;
use crate::parser::{
    html_id, normalize_to_https, override_folder, override_template, strip_dot_git_suffix,
};
use crate::remote::RemoteDescriptor;

lazy_static! {
    pub(crate) static ref REPO_PATTERN: Regex =
        Regex::new(r"(?i)^(https?://)?(\S+@)?(\S+\.)?github\.com(/|:).*").unwrap();
}

/// Web URL of a file (and optional line) on a branch.
pub fn view_url(remote: &RemoteDescriptor) -> GitUrlResult<String> {
    let (repo, branch, path) = remote.required_parts()?;

    let repo = normalize_to_https(repo);
    let mut url = format!("{}/blob/{branch}/{path}", strip_dot_git_suffix(&repo));
    if let Some(line) = remote.anchor_line() {
        url.push_str(&format!("/#L{line}"));
    }
    Ok(url)
}

/// Web URL that opens GitHub's "create file" page prefilled with an API
/// override stub for `uid`.
///
/// An empty `uid` still yields a link, with an empty file name and body.
pub fn new_file_url(remote: &RemoteDescriptor, uid: &str) -> GitUrlResult<String> {
    let (repo, branch, _) = remote.required_parts()?;

    let repo = normalize_to_https(repo);
    Ok(format!(
        "{}/new/{branch}/{}/new?filename={}.md&value={}",
        strip_dot_git_suffix(&repo),
        override_folder(&remote.api_spec_folder),
        html_id(uid),
        urlencoding::encode(&override_template(uid)),
    ))
}
