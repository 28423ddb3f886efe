//! Metadata for the field kinds a content-type schema can carry
//!
//! The enumeration is closed: a document hydrated with a tag this build does
//! not know keeps the tag verbatim in `FieldKind::Unknown` so the editor can
//! render a placeholder instead of failing.

mod field_kind;
mod registry;

pub use field_kind::FieldKind;
pub use registry::{
    describe, palette, FieldCategory, FieldKindInfo, RendersAs, UnknownFieldKind,
};
