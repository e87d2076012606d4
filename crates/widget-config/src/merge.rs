//! Typed deep-merge of partial documents over defaults.
//!
//! Stored widget documents may predate newer configuration fields. Loading
//! goes through a deep-merge over the default document so every field has a
//! defined value before the typed schema ever sees it.

use serde_json::Value;

use crate::error::ConfigError;
use crate::schema::WidgetConfig;

/// Build a full `WidgetConfig` from a partial JSON document.
///
/// Object fields are merged recursively over the defaults; scalars and
/// arrays in the partial document replace the default wholesale. `null`
/// values are ignored, so a merge can never remove a key (in particular the
/// `da` language pack survives any input).
pub fn from_partial(partial: Value) -> Result<WidgetConfig, ConfigError> {
    let mut base = serde_json::to_value(WidgetConfig::default())?;
    deep_merge(&mut base, partial);
    let config: WidgetConfig = serde_json::from_value(base)?;
    Ok(config)
}

fn deep_merge(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                if value.is_null() {
                    continue;
                }
                match base_map.get_mut(&key) {
                    Some(existing) => deep_merge(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (base_slot, overlay_value) => {
            if !overlay_value.is_null() {
                *base_slot = overlay_value;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_partial_yields_defaults() {
        let config = from_partial(json!({})).unwrap();
        assert_eq!(config, WidgetConfig::default());
    }

    #[test]
    fn test_partial_section_keeps_sibling_fields() {
        let config = from_partial(json!({
            "appearance": { "themeColor": "#111111" }
        }))
        .unwrap();

        assert_eq!(config.appearance.theme_color, "#111111");
        // Sibling fields within the section keep their defaults.
        assert_eq!(config.appearance.width, 380);
        // Sibling sections are untouched.
        assert_eq!(config.messages, WidgetConfig::default().messages);
    }

    #[test]
    fn test_null_never_removes_a_value() {
        let config = from_partial(json!({
            "appearance": { "themeColor": null },
            "messages": { "languagePacks": null }
        }))
        .unwrap();

        assert_eq!(config.appearance.theme_color, "#2563EB");
        assert!(config.messages.language_packs.contains_key("da"));
    }

    #[test]
    fn test_language_pack_map_merges_instead_of_replacing() {
        let config = from_partial(json!({
            "messages": {
                "languagePacks": {
                    "en": { "welcomeMessage": "Hello there" }
                }
            }
        }))
        .unwrap();

        // The default "da" entry survives adding "en".
        assert!(config.messages.language_packs.contains_key("da"));
        let en = &config.messages.language_packs["en"];
        assert_eq!(en.welcome_message.as_deref(), Some("Hello there"));
    }

    #[test]
    fn test_arrays_replace_wholesale() {
        let config = from_partial(json!({
            "messages": { "suggestedResponses": ["Åbningstider", "Priser"] }
        }))
        .unwrap();

        assert_eq!(
            config.messages.suggested_responses,
            vec!["Åbningstider".to_string(), "Priser".to_string()]
        );
    }

    #[test]
    fn test_unknown_enum_value_is_an_error() {
        let result = from_partial(json!({
            "appearance": { "theme": "sepia" }
        }));
        assert!(result.is_err());
    }
}
