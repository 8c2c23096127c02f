//! Path helpers exposed to templates.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref ABSOLUTE_URL: Regex = Regex::new(r"^(\w+:)?//").unwrap();
}

/// `docs/api/Foo.Bar.yml` → `Foo.Bar`.
///
/// Both `/` and `\` separate segments. Paths ending in a separator have no
/// file name and yield `""`; names without a dot are returned whole.
pub fn file_name_without_extension(path: &str) -> &str {
    if path.is_empty() || path.ends_with('/') || path.ends_with('\\') {
        return "";
    }
    let file_name = path.rsplit(['/', '\\']).next().unwrap_or(path);
    match file_name.rfind('.') {
        Some(dot) => &file_name[..dot],
        None => file_name,
    }
}

/// Everything up to and including the last `/`, or `""` without one.
pub fn directory_name(path: &str) -> &str {
    match path.rfind('/') {
        Some(index) => &path[..=index],
        None => "",
    }
}

/// True for scheme-qualified or protocol-relative URLs (`https://…`, `//…`).
pub fn is_absolute_path(path: &str) -> bool {
    ABSOLUTE_URL.is_match(path)
}

pub fn is_relative_path(path: &str) -> bool {
    !path.is_empty() && !is_absolute_path(path)
}
