//! DocFX page hooks that compute "view source" (`sourceurl`) and
//! "improve this doc" (`docurl`) links from a page's git metadata.
//!
//! The host pipeline calls [`PageAnnotator::pre_transform`] and
//! [`PageAnnotator::post_transform`] once per page. Nothing here fails a
//! build: links that cannot be computed are left unset.

pub mod annotator;
pub mod config;
pub mod error_handler;
pub mod model;
pub mod paths;
pub mod see_also;
pub mod telemetry;

pub use annotator::PageAnnotator;
pub use config::AnnotatorConfig;
pub use error_handler::{AnnotatorError, ConfigError, Result};
pub use model::{HelperOverrides, PageModel, SeeAlsoLink, SourceDetail};
