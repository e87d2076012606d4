//! Language packs: per-locale UI label bundles.
//!
//! A stored pack is an overlay of optional overrides; resolution always
//! starts from a complete built-in pack so every label has a value even when
//! the stored overlay is empty or the locale was never configured.

use serde::{Deserialize, Serialize};

use crate::schema::WidgetConfig;

/// A complete set of UI labels for one locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguagePack {
    pub welcome_message: String,
    pub popup_message: String,
    pub typing_text: String,
    pub input_placeholder: String,
    pub banner_text: String,
    pub send_button: String,
    pub close_button: String,
    pub new_chat_button: String,
    pub history_button: String,
    pub menu_label: String,
    pub online_status: String,
    pub offline_status: String,
    pub error_message: String,
    pub retry_button: String,
    pub consent_accept_button: String,
    pub consent_decline_button: String,
    pub powered_by_text: String,
    pub attachment_label: String,
    pub end_chat_button: String,
}

/// Stored per-locale overrides. Every field is optional; `None` means
/// "use the built-in label".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct LanguagePackOverlay {
    pub welcome_message: Option<String>,
    pub popup_message: Option<String>,
    pub typing_text: Option<String>,
    pub input_placeholder: Option<String>,
    pub banner_text: Option<String>,
    pub send_button: Option<String>,
    pub close_button: Option<String>,
    pub new_chat_button: Option<String>,
    pub history_button: Option<String>,
    pub menu_label: Option<String>,
    pub online_status: Option<String>,
    pub offline_status: Option<String>,
    pub error_message: Option<String>,
    pub retry_button: Option<String>,
    pub consent_accept_button: Option<String>,
    pub consent_decline_button: Option<String>,
    pub powered_by_text: Option<String>,
    pub attachment_label: Option<String>,
    pub end_chat_button: Option<String>,
}

impl LanguagePackOverlay {
    /// True if every field is unset.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// The built-in pack for a locale code. Unknown codes fall back to English.
pub fn builtin_pack(code: &str) -> LanguagePack {
    match code {
        "da" => danish(),
        _ => english(),
    }
}

/// Resolve the effective pack for a locale: the built-in pack with the
/// stored overlay applied field by field.
///
/// Overlays only take effect when `messages.custom_language` is enabled;
/// otherwise the built-in labels are returned unchanged.
pub fn resolve_pack(config: &WidgetConfig, code: &str) -> LanguagePack {
    let mut pack = builtin_pack(code);

    if !config.messages.custom_language {
        return pack;
    }

    if let Some(overlay) = config.messages.language_packs.get(code) {
        apply_overlay(&mut pack, overlay);
    }

    pack
}

fn apply_overlay(pack: &mut LanguagePack, overlay: &LanguagePackOverlay) {
    macro_rules! merge_field {
        ($field:ident) => {
            if let Some(value) = &overlay.$field {
                pack.$field = value.clone();
            }
        };
    }

    merge_field!(welcome_message);
    merge_field!(popup_message);
    merge_field!(typing_text);
    merge_field!(input_placeholder);
    merge_field!(banner_text);
    merge_field!(send_button);
    merge_field!(close_button);
    merge_field!(new_chat_button);
    merge_field!(history_button);
    merge_field!(menu_label);
    merge_field!(online_status);
    merge_field!(offline_status);
    merge_field!(error_message);
    merge_field!(retry_button);
    merge_field!(consent_accept_button);
    merge_field!(consent_decline_button);
    merge_field!(powered_by_text);
    merge_field!(attachment_label);
    merge_field!(end_chat_button);
}

fn danish() -> LanguagePack {
    LanguagePack {
        welcome_message: "Hej! Hvordan kan jeg hjælpe dig i dag?".to_string(),
        popup_message: "Har du brug for hjælp?".to_string(),
        typing_text: "Skriver...".to_string(),
        input_placeholder: "Skriv en besked...".to_string(),
        banner_text: String::new(),
        send_button: "Send".to_string(),
        close_button: "Luk".to_string(),
        new_chat_button: "Ny samtale".to_string(),
        history_button: "Tidligere samtaler".to_string(),
        menu_label: "Menu".to_string(),
        online_status: "Online".to_string(),
        offline_status: "Offline".to_string(),
        error_message: "Noget gik galt. Prøv venligst igen.".to_string(),
        retry_button: "Prøv igen".to_string(),
        consent_accept_button: "Accepter".to_string(),
        consent_decline_button: "Afvis".to_string(),
        powered_by_text: "Drevet af".to_string(),
        attachment_label: "Vedhæft fil".to_string(),
        end_chat_button: "Afslut samtale".to_string(),
    }
}

fn english() -> LanguagePack {
    LanguagePack {
        welcome_message: "Hi! How can I help you today?".to_string(),
        popup_message: "Need any help?".to_string(),
        typing_text: "Typing...".to_string(),
        input_placeholder: "Type a message...".to_string(),
        banner_text: String::new(),
        send_button: "Send".to_string(),
        close_button: "Close".to_string(),
        new_chat_button: "New chat".to_string(),
        history_button: "Previous conversations".to_string(),
        menu_label: "Menu".to_string(),
        online_status: "Online".to_string(),
        offline_status: "Offline".to_string(),
        error_message: "Something went wrong. Please try again.".to_string(),
        retry_button: "Try again".to_string(),
        consent_accept_button: "Accept".to_string(),
        consent_decline_button: "Decline".to_string(),
        powered_by_text: "Powered by".to_string(),
        attachment_label: "Attach file".to_string(),
        end_chat_button: "End chat".to_string(),
    }
}
