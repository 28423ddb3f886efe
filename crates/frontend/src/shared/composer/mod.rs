//! Schema composer: palette → canvas drag-and-drop over the field list.
//!
//! The drag logic lives in [`session`] as a plain state machine with no DOM
//! types, so it is exercised headlessly with synthetic events. The widgets
//! only translate pointer events into session calls and apply the resulting
//! schema command.

pub mod canvas;
pub mod palette;
pub mod session;

pub use canvas::ComposerCanvas;
pub use palette::ComposerPalette;
pub use session::{ComposerSession, DragOrigin, DropTarget, SchemaCommand};
