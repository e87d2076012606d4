//! The `WidgetConfig` document and its sections.
//!
//! Every field carries a serde default so a partially stored document
//! deserializes to a fully populated one; "missing field" is always the
//! default value, never an error or an undefined state.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::language::LanguagePackOverlay;

/// Widget lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WidgetStatus {
    #[default]
    Active,
    Inactive,
}

/// Widget color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    Auto,
}

/// Corner of the host page the widget anchors to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Placement {
    #[default]
    BottomRight,
    BottomLeft,
    TopRight,
    TopLeft,
}

/// Open/close animation speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AnimationSpeed {
    Slow,
    #[default]
    Normal,
    Fast,
}

/// End-user UI language selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WidgetLanguage {
    Da,
    En,
    #[default]
    Auto,
}

impl WidgetLanguage {
    /// The ISO code used for language pack lookup. `auto` resolves to Danish,
    /// the product default.
    pub fn pack_code(&self) -> &'static str {
        match self {
            WidgetLanguage::Da | WidgetLanguage::Auto => "da",
            WidgetLanguage::En => "en",
        }
    }
}

/// The full configuration document for one embeddable chat widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WidgetConfig {
    /// Opaque identifier, immutable once created. Empty until the server
    /// assigns one.
    pub id: String,
    /// Display name shown in the admin console.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Whether the widget answers on embedding sites.
    pub status: WidgetStatus,
    /// Reference to an externally configured AI prompt. Required for the
    /// widget to answer messages; absent means chat fast-fails.
    pub prompt_id: Option<String>,
    pub appearance: Appearance,
    pub messages: Messages,
    pub branding: Branding,
    pub advanced: Advanced,
    pub consent: Consent,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: "Ny widget".to_string(),
            description: String::new(),
            status: WidgetStatus::Active,
            prompt_id: None,
            appearance: Appearance::default(),
            messages: Messages::default(),
            branding: Branding::default(),
            advanced: Advanced::default(),
            consent: Consent::default(),
        }
    }
}

/// Visual appearance settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Appearance {
    /// Primary theme color as a hex string.
    pub theme_color: String,
    /// Secondary color as a hex string.
    pub secondary_color: String,
    pub theme: Theme,
    /// Widget width in pixels, 300..=800.
    pub width: u32,
    /// Widget height in pixels, 400..=800.
    pub height: u32,
    /// Corner radius in pixels, 0..=50.
    pub border_radius: u32,
    pub placement: Placement,
    pub use_gradient: bool,
    pub backdrop_blur: bool,
    pub animation_speed: AnimationSpeed,
    /// Raw CSS appended to the widget stylesheet. Opaque, never validated.
    pub custom_css: String,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            theme_color: "#2563EB".to_string(),
            secondary_color: "#F3F4F6".to_string(),
            theme: Theme::Auto,
            width: 380,
            height: 600,
            border_radius: 16,
            placement: Placement::BottomRight,
            use_gradient: false,
            backdrop_blur: false,
            animation_speed: AnimationSpeed::Normal,
            custom_css: String::new(),
        }
    }
}

/// Message texts and conversational behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Messages {
    pub welcome_message: String,
    pub input_placeholder: String,
    pub typing_text: String,
    /// Teaser bubble shown next to the closed chat button.
    pub popup_message: String,
    /// Delay before the teaser bubble appears, 0..=30000 ms.
    pub popup_delay: u32,
    pub banner_text: String,
    pub disclaimer_text: String,
    /// Quick-reply chips offered before the first user message. At most 5.
    pub suggested_responses: Vec<String>,
    pub auto_close: bool,
    pub close_button_text: String,
    /// When true, stored language pack overlays take effect; built-in labels
    /// are used otherwise.
    pub custom_language: bool,
    /// ISO language code -> label overrides merged over built-in defaults.
    /// Always contains at least the `da` entry.
    pub language_packs: BTreeMap<String, LanguagePackOverlay>,
}

impl Default for Messages {
    fn default() -> Self {
        let mut language_packs = BTreeMap::new();
        language_packs.insert("da".to_string(), LanguagePackOverlay::default());

        Self {
            welcome_message: "Hej! Hvordan kan jeg hjælpe dig i dag?".to_string(),
            input_placeholder: "Skriv en besked...".to_string(),
            typing_text: "Skriver...".to_string(),
            popup_message: "Har du brug for hjælp?".to_string(),
            popup_delay: 5000,
            banner_text: String::new(),
            disclaimer_text: String::new(),
            suggested_responses: Vec::new(),
            auto_close: false,
            close_button_text: "Luk".to_string(),
            custom_language: false,
            language_packs,
        }
    }
}

/// Branding: names, images, and the powered-by footer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Branding {
    pub title: String,
    pub assistant_name: String,
    pub company_name: String,
    pub avatar_url: String,
    pub logo_url: String,
    pub show_branding: bool,
    pub powered_by_text: String,
    pub image_settings: ImageSettings,
    pub icon_sizes: IconSizes,
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            title: "Chat".to_string(),
            assistant_name: "Assistent".to_string(),
            company_name: String::new(),
            avatar_url: String::new(),
            logo_url: String::new(),
            show_branding: true,
            powered_by_text: "Drevet af".to_string(),
            image_settings: ImageSettings::default(),
            icon_sizes: IconSizes::default(),
        }
    }
}

/// Zoom and 2D offset applied to the avatar and logo previews.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageSettings {
    /// Avatar zoom factor, 0.5..=3.0.
    pub avatar_zoom: f64,
    pub avatar_offset_x: f64,
    pub avatar_offset_y: f64,
    /// Logo zoom factor, 0.5..=3.0.
    pub logo_zoom: f64,
    pub logo_offset_x: f64,
    pub logo_offset_y: f64,
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            avatar_zoom: 1.0,
            avatar_offset_x: 0.0,
            avatar_offset_y: 0.0,
            logo_zoom: 1.0,
            logo_offset_x: 0.0,
            logo_offset_y: 0.0,
        }
    }
}

/// Pixel sizes for the header avatar, the floating chat button, and the
/// footer logo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IconSizes {
    pub header_avatar: u32,
    pub chat_button: u32,
    pub footer_logo: u32,
}

impl Default for IconSizes {
    fn default() -> Self {
        Self {
            header_avatar: 32,
            chat_button: 56,
            footer_logo: 24,
        }
    }
}

/// Advanced behavior toggles and retention limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Advanced {
    pub show_close_button: bool,
    pub show_conversation_history: bool,
    pub show_new_chat_button: bool,
    pub enable_analytics: bool,
    /// Named analytics events the widget reports.
    pub track_events: BTreeSet<String>,
    /// Conversation retention in days, 1..=365.
    pub conversation_retention: u32,
    /// Stored conversations per end user, 1..=1000.
    pub max_conversations: u32,
    pub language: WidgetLanguage,
    /// IANA timezone name used for timestamps shown to end users.
    pub timezone: String,
}

impl Default for Advanced {
    fn default() -> Self {
        let mut track_events = BTreeSet::new();
        track_events.insert("widget_open".to_string());
        track_events.insert("message_sent".to_string());

        Self {
            show_close_button: true,
            show_conversation_history: true,
            show_new_chat_button: true,
            enable_analytics: true,
            track_events,
            conversation_retention: 30,
            max_conversations: 100,
            language: WidgetLanguage::Auto,
            timezone: "Europe/Copenhagen".to_string(),
        }
    }
}

/// GDPR consent banner settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Consent {
    pub enabled: bool,
    pub title: String,
    pub description: String,
    pub privacy_url: String,
    pub cookies_url: String,
}

impl Default for Consent {
    fn default() -> Self {
        Self {
            enabled: false,
            title: "Samtykke".to_string(),
            description: "Denne chat gemmer din samtale for at kunne hjælpe dig bedre."
                .to_string(),
            privacy_url: String::new(),
            cookies_url: String::new(),
        }
    }
}
