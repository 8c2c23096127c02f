//! String helpers for turning clone URLs and file paths into web URL parts.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref PORT_SEGMENT: Regex = Regex::new(r":[0-9]+").unwrap();
    static ref COMMIT_SHA: Regex = Regex::new(r"[0-9a-fA-F]{40}").unwrap();
}

/// Folder used for API override files when nothing else is configured.
pub const DEFAULT_API_SPEC_FOLDER: &str = "apiSpec";

/// Rewrites an SSH or userinfo-bearing clone URL into its HTTPS form.
///
/// URLs without an `@` are returned unchanged. Otherwise everything up to and
/// including the first `@` is replaced by `https://`, every `:<port>` segment
/// is dropped and the remaining scp-style `:` separators become `/`:
///
/// * `git@github.com:org/repo.git` → `https://github.com/org/repo.git`
/// * `ssh://me@me.visualstudio.com:22/org/_git/repo` →
///   `https://me.visualstudio.com/org/_git/repo`
pub fn normalize_to_https(repo: &str) -> String {
    let Some(pos) = repo.find('@') else {
        return repo.to_string();
    };

    let host_and_path = PORT_SEGMENT.replace_all(&repo[pos + 1..], "");
    format!("https://{}", host_and_path.replace(':', "/"))
}

/// Removes a single trailing `.git` from a repository URL.
pub fn strip_dot_git_suffix(repo: &str) -> &str {
    repo.strip_suffix(".git").unwrap_or(repo)
}

/// True when `branch` carries a full 40-character hex commit id.
pub fn is_commit_sha(branch: &str) -> bool {
    COMMIT_SHA.is_match(branch)
}

/// Replaces every non-word character (anything but `[A-Za-z0-9_]`) with `_`.
pub fn html_id(input: &str) -> String {
    input
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Normalizes the API override folder: forward slashes, no trailing slash.
pub fn override_folder(folder: &str) -> String {
    let folder = folder.replace('\\', "/");
    match folder.strip_suffix('/') {
        Some(trimmed) => trimmed.to_string(),
        None => folder,
    }
}

/// Front-matter stub proposed as the body of a new API override file.
pub fn override_template(uid: &str) -> String {
    if uid.is_empty() {
        return String::new();
    }

    let mut content = String::new();
    content.push_str("---\n");
    content.push_str(&format!("uid: {uid}\n"));
    content.push_str(
        "summary: '*You can override summary for the API here using *MARKDOWN* syntax'\n",
    );
    content.push_str("---\n");
    content.push('\n');
    content.push_str("*Please type below more information about this API:*\n");
    content.push('\n');
    content
}

/// Converts a file path inside a wiki repository into a wiki page path.
///
/// A leading `relative_path` (default `/`) is removed and a trailing `.md`
/// extension is stripped.
pub fn wiki_page_path(path: &str, relative_path: Option<&str>) -> String {
    let relative_path = relative_path.filter(|r| !r.is_empty()).unwrap_or("/");
    let page = path.strip_prefix(relative_path).unwrap_or(path);
    strip_md_extension(page).to_string()
}

/// Drops a trailing `.md` extension.
pub fn strip_md_extension(path: &str) -> &str {
    path.strip_suffix(".md").unwrap_or(path)
}
