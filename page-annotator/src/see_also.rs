//! "See also" post-processing for API pages.

use crate::model::PageModel;

/// Marks code-reference links so templates render them as `xref`s.
///
/// A link counts as a code reference when it has no `linkType` or its
/// `linkType` is `cref` (any case).
pub fn process_see_also(model: &mut PageModel) {
    let Some(links) = model.seealso.as_mut() else {
        return;
    };

    for link in links {
        let is_cref = match link.link_type.as_deref() {
            None | Some("") => true,
            Some(kind) => kind.eq_ignore_ascii_case("cref"),
        };
        if is_cref {
            link.is_cref = Some(true);
        }
    }
}
