//! Widget configuration schema and supporting logic.
//!
//! This crate defines the canonical `WidgetConfig` document for one
//! embeddable chat widget: appearance, messages (including per-language
//! packs), branding, advanced behavior, and consent settings. It also
//! provides the typed deep-merge used to load partial documents over
//! defaults, field-keyed validation, and the embed-tag artifact.
//!
//! # Example
//!
//! ```rust
//! use widget_config::{validate, WidgetConfig};
//!
//! let mut config = WidgetConfig::default();
//! config.appearance.width = 900;
//!
//! let errors = validate(&config);
//! assert_eq!(errors[0].field, "appearance.width");
//! ```

pub mod embed;
pub mod error;
pub mod language;
pub mod merge;
pub mod schema;
pub mod validate;

pub use embed::embed_tag;
pub use error::ConfigError;
pub use language::{resolve_pack, LanguagePack, LanguagePackOverlay};
pub use merge::from_partial;
pub use schema::{
    Advanced, AnimationSpeed, Appearance, Branding, Consent, IconSizes, ImageSettings, Messages,
    Placement, Theme, WidgetConfig, WidgetLanguage, WidgetStatus,
};
pub use validate::{clamp, validate, FieldError};

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
