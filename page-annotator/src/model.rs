//! Page metadata as handed over by the DocFX pipeline.
//!
//! Only the keys the hooks read or write are typed; everything else is kept in
//! `extra` so a model survives a decode/encode cycle.

use git_url_patterns::{GitRemote, OverrideDescriptor, PageContext};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Per-page model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageModel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceDetail>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<SourceDetail>,
    /// "View source" link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sourceurl: Option<String>,
    /// "Improve this doc" link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docurl: Option<String>,
    #[serde(
        rename = "_gitContribute",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub git_contribute: Option<OverrideDescriptor>,
    /// Side-channel remote applied to both `source` and `documentation`.
    #[serde(
        rename = "_docfxHelper",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub docfx_helper: Option<HelperOverrides>,
    /// Wiki base URL written into the page header by the wiki converter.
    #[serde(
        rename = "_adoWikiUri",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub ado_wiki_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ado_wiki_absolute_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ado_wiki_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seealso: Option<Vec<SeeAlsoLink>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `source` / `documentation` block of a page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceDetail {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote: Option<GitRemote>,
    /// Zero-based.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_line: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_line: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `_docfxHelper` block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HelperOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote: Option<GitRemote>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_line: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_line: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One entry of a page's "see also" list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeeAlsoLink {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_cref: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PageModel {
    /// True once either link has been produced; both are then left alone.
    pub fn has_links(&self) -> bool {
        non_empty(&self.sourceurl).is_some() || non_empty(&self.docurl).is_some()
    }

    /// Wiki base URL from `_adoWikiUri` or `_gitContribute.AdoWikiUri`.
    pub fn wiki_uri(&self) -> Option<&str> {
        non_empty(&self.ado_wiki_uri).or_else(|| {
            self.git_contribute
                .as_ref()
                .and_then(|g| non_empty(&g.ado_wiki_uri))
        })
    }

    pub fn source_remote(&self) -> Option<&GitRemote> {
        self.source.as_ref().and_then(|s| s.remote.as_ref())
    }

    pub fn documentation_remote(&self) -> Option<&GitRemote> {
        self.documentation.as_ref().and_then(|d| d.remote.as_ref())
    }

    pub fn page_context(&self) -> PageContext<'_> {
        PageContext {
            ado_wiki_path: non_empty(&self.ado_wiki_path),
        }
    }
}

pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
