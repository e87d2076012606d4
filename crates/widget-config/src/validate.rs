//! Field-level validation and clamping for widget configurations.
//!
//! Validation is advisory and field-scoped: each violation is reported as a
//! `FieldError` keyed `"<section>.<field>"` so callers can block persistence
//! of the affected field without touching the rest of the document.

use std::fmt;

use crate::schema::WidgetConfig;

/// Minimum widget width in pixels.
pub const MIN_WIDTH: u32 = 300;
/// Maximum widget width in pixels.
pub const MAX_WIDTH: u32 = 800;
/// Minimum widget height in pixels.
pub const MIN_HEIGHT: u32 = 400;
/// Maximum widget height in pixels.
pub const MAX_HEIGHT: u32 = 800;
/// Maximum corner radius in pixels.
pub const MAX_BORDER_RADIUS: u32 = 50;
/// Maximum popup delay in milliseconds.
pub const MAX_POPUP_DELAY: u32 = 30_000;
/// Maximum number of suggested responses.
pub const MAX_SUGGESTED_RESPONSES: usize = 5;
/// Minimum image zoom factor.
pub const MIN_ZOOM: f64 = 0.5;
/// Maximum image zoom factor.
pub const MAX_ZOOM: f64 = 3.0;
/// Conversation retention bounds in days.
pub const RETENTION_RANGE: (u32, u32) = (1, 365);
/// Stored conversation count bounds.
pub const MAX_CONVERSATIONS_RANGE: (u32, u32) = (1, 1000);

/// A validation failure scoped to a single field.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct FieldError {
    /// Dotted path of the offending field, e.g. `appearance.width`.
    pub field: String,
    /// Human-readable message shown next to the control.
    pub message: String,
}

impl FieldError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a full configuration document.
///
/// Returns one error per violated field; an empty vector means the document
/// may be persisted.
pub fn validate(config: &WidgetConfig) -> Vec<FieldError> {
    let mut errors = Vec::new();

    let a = &config.appearance;
    if !is_hex_color(&a.theme_color) {
        errors.push(FieldError::new(
            "appearance.themeColor",
            "Theme color must be a hex color like #2563EB",
        ));
    }
    if !is_hex_color(&a.secondary_color) {
        errors.push(FieldError::new(
            "appearance.secondaryColor",
            "Secondary color must be a hex color like #F3F4F6",
        ));
    }
    if a.width < MIN_WIDTH || a.width > MAX_WIDTH {
        errors.push(FieldError::new(
            "appearance.width",
            "Width must be between 300 and 800 pixels",
        ));
    }
    if a.height < MIN_HEIGHT || a.height > MAX_HEIGHT {
        errors.push(FieldError::new(
            "appearance.height",
            "Height must be between 400 and 800 pixels",
        ));
    }
    if a.border_radius > MAX_BORDER_RADIUS {
        errors.push(FieldError::new(
            "appearance.borderRadius",
            "Border radius must be between 0 and 50 pixels",
        ));
    }

    let m = &config.messages;
    if m.popup_delay > MAX_POPUP_DELAY {
        errors.push(FieldError::new(
            "messages.popupDelay",
            "Popup delay must be between 0 and 30000 milliseconds",
        ));
    }
    if m.suggested_responses.len() > MAX_SUGGESTED_RESPONSES {
        errors.push(FieldError::new(
            "messages.suggestedResponses",
            "At most 5 suggested responses are allowed",
        ));
    }
    if !m.language_packs.contains_key("da") {
        errors.push(FieldError::new(
            "messages.languagePacks",
            "The Danish language pack must be present",
        ));
    }

    let img = &config.branding.image_settings;
    if img.avatar_zoom < MIN_ZOOM || img.avatar_zoom > MAX_ZOOM {
        errors.push(FieldError::new(
            "branding.imageSettings.avatarZoom",
            "Avatar zoom must be between 0.5 and 3.0",
        ));
    }
    if img.logo_zoom < MIN_ZOOM || img.logo_zoom > MAX_ZOOM {
        errors.push(FieldError::new(
            "branding.imageSettings.logoZoom",
            "Logo zoom must be between 0.5 and 3.0",
        ));
    }

    let adv = &config.advanced;
    if adv.conversation_retention < RETENTION_RANGE.0
        || adv.conversation_retention > RETENTION_RANGE.1
    {
        errors.push(FieldError::new(
            "advanced.conversationRetention",
            "Conversation retention must be between 1 and 365 days",
        ));
    }
    if adv.max_conversations < MAX_CONVERSATIONS_RANGE.0
        || adv.max_conversations > MAX_CONVERSATIONS_RANGE.1
    {
        errors.push(FieldError::new(
            "advanced.maxConversations",
            "Max conversations must be between 1 and 1000",
        ));
    }

    errors
}

/// Force every numeric field into its valid range.
///
/// Used when importing documents from sources that were never validated;
/// the editor path reports `FieldError`s instead of silently clamping.
pub fn clamp(config: &mut WidgetConfig) {
    let a = &mut config.appearance;
    a.width = a.width.clamp(MIN_WIDTH, MAX_WIDTH);
    a.height = a.height.clamp(MIN_HEIGHT, MAX_HEIGHT);
    a.border_radius = a.border_radius.min(MAX_BORDER_RADIUS);

    let m = &mut config.messages;
    m.popup_delay = m.popup_delay.min(MAX_POPUP_DELAY);
    m.suggested_responses.truncate(MAX_SUGGESTED_RESPONSES);

    let img = &mut config.branding.image_settings;
    img.avatar_zoom = img.avatar_zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    img.logo_zoom = img.logo_zoom.clamp(MIN_ZOOM, MAX_ZOOM);

    let adv = &mut config.advanced;
    adv.conversation_retention = adv
        .conversation_retention
        .clamp(RETENTION_RANGE.0, RETENTION_RANGE.1);
    adv.max_conversations = adv
        .max_conversations
        .clamp(MAX_CONVERSATIONS_RANGE.0, MAX_CONVERSATIONS_RANGE.1);
}

/// Basic hex color check: `#RGB` or `#RRGGBB`.
pub fn is_hex_color(value: &str) -> bool {
    let Some(digits) = value.strip_prefix('#') else {
        return false;
    };
    (digits.len() == 3 || digits.len() == 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&WidgetConfig::default()).is_empty());
    }

    #[test]
    fn test_width_out_of_range() {
        let mut config = WidgetConfig::default();
        config.appearance.width = 900;

        let errors = validate(&config);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "appearance.width");
        assert_eq!(errors[0].message, "Width must be between 300 and 800 pixels");
    }

    #[test]
    fn test_errors_are_field_scoped() {
        let mut config = WidgetConfig::default();
        config.appearance.width = 200;
        config.messages.popup_delay = 60_000;

        let errors = validate(&config);
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["appearance.width", "messages.popupDelay"]);
    }

    #[test]
    fn test_too_many_suggested_responses() {
        let mut config = WidgetConfig::default();
        config.messages.suggested_responses = (0..6).map(|i| format!("Svar {i}")).collect();

        let errors = validate(&config);
        assert_eq!(errors[0].field, "messages.suggestedResponses");
    }

    #[test]
    fn test_missing_danish_pack_is_an_error() {
        let mut config = WidgetConfig::default();
        config.messages.language_packs.clear();

        let errors = validate(&config);
        assert!(errors.iter().any(|e| e.field == "messages.languagePacks"));
    }

    #[test]
    fn test_zoom_bounds() {
        let mut config = WidgetConfig::default();
        config.branding.image_settings.avatar_zoom = 0.4;
        config.branding.image_settings.logo_zoom = 3.5;

        let errors = validate(&config);
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_clamp_forces_ranges() {
        let mut config = WidgetConfig::default();
        config.appearance.width = 900;
        config.appearance.height = 100;
        config.messages.popup_delay = 99_999;
        config.messages.suggested_responses = (0..8).map(|i| i.to_string()).collect();
        config.branding.image_settings.avatar_zoom = 10.0;

        clamp(&mut config);
        assert_eq!(config.appearance.width, 800);
        assert_eq!(config.appearance.height, 400);
        assert_eq!(config.messages.popup_delay, 30_000);
        assert_eq!(config.messages.suggested_responses.len(), 5);
        assert_eq!(config.branding.image_settings.avatar_zoom, 3.0);
        assert!(validate(&config).is_empty());
    }

    #[test]
    fn test_hex_color() {
        assert!(is_hex_color("#2563EB"));
        assert!(is_hex_color("#fff"));
        assert!(!is_hex_color("2563EB"));
        assert!(!is_hex_color("#25q3EB"));
        assert!(!is_hex_color("#2563"));
    }
}
