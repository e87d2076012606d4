//! Editor-side state machines for the widget settings screens.
//!
//! `SettingsDraft` holds the in-memory copy of a widget configuration while
//! an operator edits it section by section; nothing touches persistence
//! until the single explicit save action. `ImageAdjustModal` is the local
//! draft behind the avatar/logo zoom-and-position dialog.

pub mod draft;
pub mod error;
pub mod image_adjust;

pub use draft::SettingsDraft;
pub use error::EditorError;
pub use image_adjust::{AdjustContext, ImageAdjustModal};

/// Result type for editor operations.
pub type Result<T> = std::result::Result<T, EditorError>;
