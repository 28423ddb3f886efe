//! Slug composition: identifier normalization, route templates, previews
//!
//! Everything here is pure string work so the frontend can recompute it on
//! every keystroke and the backend can validate the same way.

mod ident;
mod preview;
mod template;

pub use ident::{api_identifier_from_label, slugify};
pub use preview::{build_preview, plan_params, unbound_names, ParamSource, SlugParam};
pub use template::{Placeholder, RouteTemplate, TemplateError};
