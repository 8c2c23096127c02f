//! DocFX page hooks filling in `sourceurl` and `docurl`.
//!
//! `pre_transform` folds the `_docfxHelper` side channel into the page and
//! links Azure DevOps wiki pages straight from their wiki base URI.
//! `post_transform` renders whichever link is still unset through the
//! provider table and marks code-reference "see also" entries.
//! Each hook returns the model untouched when it already carries a link on
//! entry; `annotate` checks that once and then runs both steps.

use git_url_patterns::git_providers::azure_wiki;
use git_url_patterns::parser::{strip_md_extension, wiki_page_path};
use git_url_patterns::{GitRemote, RemoteInfoResolver, UrlPatternRegistry};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::AnnotatorConfig;
use crate::error_handler::{AnnotatorError, Result};
use crate::model::{HelperOverrides, PageModel, SourceDetail, non_empty};
use crate::see_also::process_see_also;

/// Page-level hook runner.
#[derive(Debug, Clone)]
pub struct PageAnnotator {
    registry: UrlPatternRegistry,
    resolver: RemoteInfoResolver,
}

impl Default for PageAnnotator {
    fn default() -> Self {
        Self::new(&AnnotatorConfig::default())
    }
}

impl PageAnnotator {
    pub fn new(config: &AnnotatorConfig) -> Self {
        let registry = UrlPatternRegistry::with_pinned_pattern(config.git_url_pattern.as_deref());
        if let Some(pattern) = &config.git_url_pattern
            && registry.pinned().is_none()
        {
            warn!(pattern = %pattern, "unknown git url pattern, detecting providers per page");
        }

        Self {
            registry,
            resolver: RemoteInfoResolver::new(config.api_spec_folder.clone()),
        }
    }

    /// Runs both hooks in pipeline order.
    ///
    /// A wiki `docurl` produced by the first step does not stop the second
    /// from rendering `sourceurl`.
    pub fn annotate(&self, model: PageModel) -> PageModel {
        if model.has_links() {
            return model;
        }
        self.render_links(self.fold_side_channel(model))
    }

    /// Pre-render hook: side-channel merge and wiki links.
    pub fn pre_transform(&self, model: PageModel) -> PageModel {
        if model.has_links() {
            return model;
        }
        self.fold_side_channel(model)
    }

    /// Post-render hook: provider-rendered links.
    pub fn post_transform(&self, model: PageModel) -> PageModel {
        if model.has_links() {
            return model;
        }
        self.render_links(model)
    }

    fn fold_side_channel(&self, mut model: PageModel) -> PageModel {
        if let Some(helper) = model.docfx_helper.clone() {
            apply_helper_overrides(&mut model, &helper);
        }

        if let Some(docurl) = wiki_doc_url(&model) {
            info!(page = model.path.as_deref().unwrap_or_default(), %docurl, "linked wiki page");
            model.docurl = Some(docurl);
        }

        model
    }

    fn render_links(&self, mut model: PageModel) -> PageModel {
        if non_empty(&model.sourceurl).is_none() {
            let sourceurl = self.view_source_url(&model);
            debug!(page = model.path.as_deref().unwrap_or_default(), %sourceurl, "rendered view source link");
            model.sourceurl = Some(sourceurl).filter(|url| !url.is_empty());
        }
        if non_empty(&model.docurl).is_none() {
            let docurl = self.improve_doc_url(&model);
            debug!(page = model.path.as_deref().unwrap_or_default(), %docurl, "rendered improve doc link");
            model.docurl = Some(docurl).filter(|url| !url.is_empty());
        }

        process_see_also(&mut model);
        model
    }

    /// "View source" link for the page's `source.remote`, or `""`.
    ///
    /// `_gitContribute` does not apply to this link.
    pub fn view_source_url(&self, model: &PageModel) -> String {
        let Some(source) = model.source.as_ref() else {
            return String::new();
        };
        let Some(remote) = source.remote.as_ref() else {
            return String::new();
        };

        let remote = self
            .resolver
            .merge(None, Some(remote))
            .with_start_line(one_based(source.start_line));
        self.registry.view_url(&remote, &model.page_context())
    }

    /// "Improve this doc" link, or `""`.
    ///
    /// Without a `documentation.remote` this proposes a new API override file
    /// next to `source.remote`; otherwise it points at the documentation file.
    pub fn improve_doc_url(&self, model: &PageModel) -> String {
        let overrides = model.git_contribute.as_ref();

        match model.documentation.as_ref() {
            Some(SourceDetail {
                remote: Some(remote),
                start_line,
                ..
            }) => {
                let remote = self
                    .resolver
                    .merge(overrides, Some(remote))
                    .with_start_line(one_based(*start_line));
                self.registry.view_url(&remote, &model.page_context())
            }
            _ => {
                if model.source.is_none() {
                    return String::new();
                }
                let remote = self.resolver.merge(overrides, model.source_remote());
                let uid = model.uid.as_deref().unwrap_or_default();
                self.registry.new_file_url(&remote, uid)
            }
        }
    }

    /// Annotates a JSON page model, or an array of them, and re-encodes it.
    ///
    /// # Errors
    /// Fails when the input is not JSON or not shaped like page models.
    pub fn annotate_json(&self, raw: &str) -> Result<String> {
        let value: Value = serde_json::from_str(raw)?;
        let annotated = match value {
            Value::Array(pages) => Value::Array(
                pages
                    .into_iter()
                    .map(|page| self.annotate_value(page))
                    .collect::<Result<Vec<_>>>()?,
            ),
            page @ Value::Object(_) => self.annotate_value(page)?,
            _ => return Err(AnnotatorError::UnexpectedShape),
        };
        Ok(serde_json::to_string_pretty(&annotated)?)
    }

    fn annotate_value(&self, page: Value) -> Result<Value> {
        if !page.is_object() {
            return Err(AnnotatorError::UnexpectedShape);
        }
        let model: PageModel = serde_json::from_value(page)?;
        Ok(serde_json::to_value(self.annotate(model))?)
    }
}

/// Stored lines are zero-based, URLs are one-based.
fn one_based(line: Option<i64>) -> Option<i64> {
    line.map(|l| l.saturating_add(1))
}

/// Copies every value set on `_docfxHelper` onto both `source` and
/// `documentation`, creating the nested blocks as needed.
fn apply_helper_overrides(model: &mut PageModel, helper: &HelperOverrides) {
    let Some(helper_remote) = helper.remote.as_ref() else {
        return;
    };

    for detail in [&mut model.source, &mut model.documentation] {
        let detail = detail.get_or_insert_with(SourceDetail::default);
        let remote = detail.remote.get_or_insert_with(GitRemote::default);

        if let Some(repo) = non_empty(&helper_remote.repo) {
            remote.repo = Some(repo.to_string());
        }
        if let Some(branch) = non_empty(&helper_remote.branch) {
            remote.branch = Some(branch.to_string());
        }
        if let Some(path) = non_empty(&helper_remote.path) {
            remote.path = Some(path.to_string());
        }
        if let Some(relative_path) = non_empty(&helper_remote.relative_path) {
            remote.relative_path = Some(relative_path.to_string());
        }
        if let Some(line) = helper.start_line.filter(|l| *l != 0) {
            detail.start_line = Some(line);
        }
        if let Some(line) = helper.end_line.filter(|l| *l != 0) {
            detail.end_line = Some(line);
        }
    }
}

/// Wiki link built from the page's wiki base URI, bypassing detection.
///
/// `adoWikiAbsolutePath` always wins; otherwise the documentation path (or
/// the page path) is trimmed of `_gitContribute.relativePath`.
fn wiki_doc_url(model: &PageModel) -> Option<String> {
    let wiki_uri = model.wiki_uri()?;

    let page_path = match non_empty(&model.ado_wiki_absolute_path) {
        Some(absolute) => strip_md_extension(absolute).to_string(),
        None => {
            let path = model
                .documentation_remote()
                .and_then(|r| non_empty(&r.path))
                .or_else(|| non_empty(&model.path))?;
            let relative_path = model
                .git_contribute
                .as_ref()
                .and_then(|g| g.relative_path.as_deref());
            wiki_page_path(path, relative_path)
        }
    };

    Some(azure_wiki::page_url(wiki_uri, &page_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn page(value: Value) -> PageModel {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn github_source_and_doc_links() {
        let model = page(json!({
            "source": {
                "remote": { "repo": "git@github.com:org/repo.git", "branch": "main", "path": "src/Foo.cs" },
                "startLine": 9
            },
            "documentation": {
                "remote": { "repo": "https://github.com/org/repo", "branch": "main", "path": "docs/foo.md" },
                "startLine": 0
            }
        }));

        let out = PageAnnotator::default().annotate(model);
        assert_eq!(
            out.sourceurl.as_deref(),
            Some("https://github.com/org/repo/blob/main/src/Foo.cs/#L10")
        );
        assert_eq!(
            out.docurl.as_deref(),
            Some("https://github.com/org/repo/blob/main/docs/foo.md/#L1")
        );
    }

    #[test]
    fn missing_start_line_means_no_anchor() {
        let model = page(json!({
            "source": { "remote": { "repo": "https://github.com/org/repo", "branch": "main", "path": "a.md" } }
        }));
        let annotator = PageAnnotator::default();
        assert_eq!(
            annotator.view_source_url(&model),
            "https://github.com/org/repo/blob/main/a.md"
        );
    }

    #[test]
    fn git_contribute_overrides_documentation_but_not_source() {
        let model = page(json!({
            "source": { "remote": { "repo": "https://github.com/org/repo", "branch": "main", "path": "a.md" } },
            "documentation": { "remote": { "repo": "https://github.com/org/repo", "branch": "main", "path": "a.md" } },
            "_gitContribute": { "branch": "live" }
        }));
        let out = PageAnnotator::default().annotate(model);
        assert_eq!(
            out.sourceurl.as_deref(),
            Some("https://github.com/org/repo/blob/main/a.md")
        );
        assert_eq!(
            out.docurl.as_deref(),
            Some("https://github.com/org/repo/blob/live/a.md")
        );
    }

    #[test]
    fn no_documentation_remote_proposes_new_file() {
        let model = page(json!({
            "uid": "Acme.Widget",
            "source": { "remote": { "repo": "https://github.com/org/repo.git", "branch": "main", "path": "src/Widget.cs" } },
            "_gitContribute": { "apiSpecFolder": "docs/overrides/" }
        }));
        let out = PageAnnotator::default().annotate(model);
        let docurl = out.docurl.unwrap();
        assert!(docurl.starts_with(
            "https://github.com/org/repo/new/main/docs/overrides/new?filename=Acme_Widget.md&value="
        ));
    }

    #[test]
    fn page_without_uid_still_gets_new_file_link() {
        let model = page(json!({
            "source": { "remote": { "repo": "https://github.com/org/repo", "branch": "main", "path": "src/Widget.cs" } }
        }));
        assert_eq!(
            PageAnnotator::default().improve_doc_url(&model),
            "https://github.com/org/repo/new/main/apiSpec/new?filename=.md&value="
        );
    }

    #[test]
    fn post_transform_marks_see_also_crefs() {
        let model = page(json!({
            "seealso": [ { "linkId": "System.String" }, { "linkType": "href", "linkId": "https://example.com" } ]
        }));
        let out = PageAnnotator::default().post_transform(model);
        let links = out.seealso.unwrap();
        assert_eq!(links[0].is_cref, Some(true));
        assert_eq!(links[1].is_cref, None);
    }

    #[test]
    fn host_api_spec_folder_is_the_default() {
        let config = AnnotatorConfig {
            api_spec_folder: "reference".into(),
            ..Default::default()
        };
        let model = page(json!({
            "uid": "Acme.Widget",
            "source": { "remote": { "repo": "https://github.com/org/repo", "branch": "main", "path": "src/Widget.cs" } }
        }));
        let url = PageAnnotator::new(&config).improve_doc_url(&model);
        assert!(url.starts_with("https://github.com/org/repo/new/main/reference/new?"));
    }

    #[test]
    fn new_file_not_offered_outside_github() {
        let model = page(json!({
            "uid": "Acme.Widget",
            "source": { "remote": { "repo": "https://dev.azure.com/acme/P/_git/R", "branch": "main", "path": "src/Widget.cs" } }
        }));
        let out = PageAnnotator::default().annotate(model);
        assert_eq!(out.docurl, None);
        assert_eq!(
            out.sourceurl.as_deref(),
            Some("https://dev.azure.com/acme/P/_git/R?path=src/Widget.cs&version=GBmain")
        );
    }

    #[test]
    fn pinned_provider_applies_to_every_page() {
        let config = AnnotatorConfig::default().with_git_url_pattern("vso");
        let model = page(json!({
            "source": { "remote": { "repo": "https://tfs.acme.local/Coll/P/_git/R", "branch": "main", "path": "a.md" }, "startLine": 2 }
        }));
        let out = PageAnnotator::new(&config).annotate(model);
        assert_eq!(
            out.sourceurl.as_deref(),
            Some("https://tfs.acme.local/Coll/P/_git/R?path=a.md&version=GBmain&line=3")
        );
    }

    #[test]
    fn existing_link_short_circuits_both_hooks() {
        let model = page(json!({
            "docurl": "https://example.com/edit",
            "source": { "remote": { "repo": "https://github.com/org/repo", "branch": "main", "path": "a.md" } },
            "_docfxHelper": { "remote": { "repo": "https://github.com/other/repo" } },
            "_adoWikiUri": "https://dev.azure.com/a/b/_wiki/wikis/c"
        }));
        let annotator = PageAnnotator::default();
        assert_eq!(annotator.pre_transform(model.clone()), model);
        assert_eq!(annotator.post_transform(model.clone()), model);
        assert_eq!(annotator.annotate(model.clone()), model);
    }

    #[test]
    fn annotate_is_idempotent() {
        let model = page(json!({
            "source": { "remote": { "repo": "https://github.com/org/repo", "branch": "main", "path": "a.md" } }
        }));
        let annotator = PageAnnotator::default();
        let once = annotator.annotate(model);
        let twice = annotator.annotate(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn helper_remote_fills_both_blocks() {
        let model = page(json!({
            "_docfxHelper": {
                "remote": { "repo": "https://github.com/org/repo", "branch": "main", "path": "ps/Get-Thing.ps1" },
                "startLine": 4,
                "endLine": 20
            }
        }));
        let out = PageAnnotator::default().pre_transform(model);

        for detail in [out.source.as_ref().unwrap(), out.documentation.as_ref().unwrap()] {
            let remote = detail.remote.as_ref().unwrap();
            assert_eq!(remote.repo.as_deref(), Some("https://github.com/org/repo"));
            assert_eq!(remote.path.as_deref(), Some("ps/Get-Thing.ps1"));
            assert_eq!(detail.start_line, Some(4));
            assert_eq!(detail.end_line, Some(20));
        }
        assert_eq!(out.docurl, None);
        assert_eq!(out.sourceurl, None);
    }

    #[test]
    fn helper_only_overrides_values_it_sets() {
        let model = page(json!({
            "source": { "remote": { "repo": "https://github.com/org/repo", "branch": "main", "path": "old.md" }, "startLine": 7 },
            "_docfxHelper": { "remote": { "path": "new.md", "branch": "" }, "startLine": 0 }
        }));
        let out = PageAnnotator::default().annotate(model);

        let source = out.source.as_ref().unwrap();
        assert_eq!(source.start_line, Some(7));
        assert_eq!(source.remote.as_ref().unwrap().branch.as_deref(), Some("main"));
        assert_eq!(
            out.sourceurl.as_deref(),
            Some("https://github.com/org/repo/blob/main/new.md/#L8")
        );
        // documentation was created from the helper alone and has no repo
        let doc_remote = out.documentation.as_ref().unwrap().remote.as_ref().unwrap();
        assert_eq!(doc_remote.repo, None);
        assert_eq!(out.docurl, None);
    }

    #[test]
    fn wiki_uri_builds_docurl_without_detection() {
        let model = page(json!({
            "path": "wiki/Foo/Bar.md",
            "documentation": { "remote": { "repo": "https://dev.azure.com/acme/Docs/_git/Docs.wiki", "branch": "wikiMaster", "path": "/wiki/Foo/Bar.md" } },
            "_gitContribute": {
                "AdoWikiUri": "https://dev.azure.com/acme/Docs/_wiki/wikis/Docs.wiki",
                "relativePath": "/wiki"
            }
        }));
        let out = PageAnnotator::default().annotate(model);
        assert_eq!(
            out.docurl.as_deref(),
            Some("https://dev.azure.com/acme/Docs/_wiki/wikis/Docs.wiki?pagePath=/Foo/Bar")
        );
        assert_eq!(out.sourceurl, None);
    }

    #[test]
    fn wiki_page_keeps_its_view_source_link() {
        let model = page(json!({
            "_docfxHelper": {
                "remote": { "repo": "https://github.com/org/repo", "branch": "main", "path": "wiki/Foo.md" }
            },
            "_adoWikiUri": "https://dev.azure.com/acme/Docs/_wiki/wikis/Docs.wiki"
        }));
        let out = PageAnnotator::default().annotate(model);
        assert_eq!(
            out.docurl.as_deref(),
            Some("https://dev.azure.com/acme/Docs/_wiki/wikis/Docs.wiki?pagePath=wiki/Foo")
        );
        assert_eq!(
            out.sourceurl.as_deref(),
            Some("https://github.com/org/repo/blob/main/wiki/Foo.md")
        );
    }

    #[test]
    fn source_remote_and_wiki_uri_through_separate_hooks() {
        let raw = json!({
            "path": "wiki/Setup.md",
            "source": {
                "remote": { "repo": "git@bitbucket.org:acme/docs.git", "branch": "dev", "path": "wiki/Setup.md" },
                "startLine": 0
            },
            "_gitContribute": {
                "AdoWikiUri": "https://dev.azure.com/acme/Docs/_wiki/wikis/Docs.wiki",
                "relativePath": "wiki/"
            }
        });
        let annotator = PageAnnotator::default();

        let pre = annotator.pre_transform(page(raw.clone()));
        assert_eq!(
            pre.docurl.as_deref(),
            Some("https://dev.azure.com/acme/Docs/_wiki/wikis/Docs.wiki?pagePath=Setup")
        );
        assert_eq!(pre.sourceurl, None);

        let out = annotator.annotate(page(raw));
        assert_eq!(out.docurl, pre.docurl);
        assert_eq!(
            out.sourceurl.as_deref(),
            Some("https://bitbucket.org/acme/docs/src/dev/wiki/Setup.md#lines-1")
        );
    }

    #[test]
    fn helper_relative_path_reaches_both_remotes() {
        let model = page(json!({
            "source": { "remote": { "repo": "https://github.com/org/repo", "branch": "main", "path": "a.md", "relativePath": "/old" } },
            "_docfxHelper": { "remote": { "relativePath": "/wiki" } }
        }));
        let out = PageAnnotator::default().pre_transform(model);

        for detail in [out.source.as_ref().unwrap(), out.documentation.as_ref().unwrap()] {
            let remote = detail.remote.as_ref().unwrap();
            assert_eq!(remote.relative_path.as_deref(), Some("/wiki"));
        }
        let source_remote = out.source_remote().unwrap();
        assert_eq!(source_remote.path.as_deref(), Some("a.md"));
    }

    #[test]
    fn absolute_wiki_path_wins() {
        let model = page(json!({
            "documentation": { "remote": { "path": "/wiki/renamed-by-converter.md" } },
            "_adoWikiUri": "https://dev.azure.com/acme/Docs/_wiki/wikis/Docs.wiki",
            "_gitContribute": { "relativePath": "/wiki" },
            "adoWikiAbsolutePath": "/Team Notes/Original Page.md"
        }));
        let out = PageAnnotator::default().pre_transform(model);
        assert_eq!(
            out.docurl.as_deref(),
            Some("https://dev.azure.com/acme/Docs/_wiki/wikis/Docs.wiki?pagePath=/Team Notes/Original Page")
        );
    }

    #[test]
    fn wiki_path_falls_back_to_page_path() {
        let model = page(json!({
            "path": "/Setup.md",
            "_adoWikiUri": "https://dev.azure.com/acme/Docs/_wiki/wikis/Docs.wiki"
        }));
        let out = PageAnnotator::default().pre_transform(model);
        assert_eq!(
            out.docurl.as_deref(),
            Some("https://dev.azure.com/acme/Docs/_wiki/wikis/Docs.wiki?pagePath=Setup")
        );
    }

    #[test]
    fn wiki_uri_without_any_path_leaves_docurl_unset() {
        let model = page(json!({ "_adoWikiUri": "https://dev.azure.com/acme/Docs/_wiki/wikis/Docs.wiki" }));
        let out = PageAnnotator::default().pre_transform(model);
        assert_eq!(out.docurl, None);
    }

    #[test]
    fn wiki_remote_detected_in_post_transform_uses_ado_wiki_path() {
        let model = page(json!({
            "documentation": { "remote": { "repo": "https://dev.azure.com/acme/Docs/_wiki/wikis/Docs.wiki", "branch": "main", "path": "/Foo.md" } },
            "adoWikiPath": "/Foo Original"
        }));
        let out = PageAnnotator::default().post_transform(model);
        assert_eq!(
            out.docurl.as_deref(),
            Some("https://dev.azure.com/acme/Docs/_wiki/wikis/Docs.wiki?pagePath=/Foo Original")
        );
    }

    #[test]
    fn page_without_git_metadata_is_left_alone() {
        let model = page(json!({ "title": "Orphan" }));
        let out = PageAnnotator::default().annotate(model.clone());
        assert_eq!(out, model);
    }

    #[test]
    fn annotate_json_handles_arrays_and_objects() {
        let annotator = PageAnnotator::default();
        let single = r#"{"source":{"remote":{"repo":"https://bitbucket.org/o/r.git","branch":"dev","path":"a.md"},"startLine":1}}"#;
        let out: Value = serde_json::from_str(&annotator.annotate_json(single).unwrap()).unwrap();
        assert_eq!(out["sourceurl"], "https://bitbucket.org/o/r/src/dev/a.md#lines-2");

        let many = format!("[{single}, {{\"docurl\": \"kept\"}}]");
        let out: Value = serde_json::from_str(&annotator.annotate_json(&many).unwrap()).unwrap();
        assert_eq!(out[0]["sourceurl"], "https://bitbucket.org/o/r/src/dev/a.md#lines-2");
        assert_eq!(out[1]["docurl"], "kept");
        assert!(out[1].get("sourceurl").is_none());
    }

    #[test]
    fn annotate_json_rejects_other_shapes() {
        let annotator = PageAnnotator::default();
        assert!(matches!(
            annotator.annotate_json("42"),
            Err(AnnotatorError::UnexpectedShape)
        ));
        assert!(matches!(
            annotator.annotate_json("[1]"),
            Err(AnnotatorError::UnexpectedShape)
        ));
        assert!(matches!(
            annotator.annotate_json("{not json"),
            Err(AnnotatorError::Json(_))
        ));
    }
}
