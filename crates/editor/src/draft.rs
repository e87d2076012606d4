//! The settings draft: local working copy of a widget configuration.
//!
//! Edits are section-scoped. Updating one section never perturbs its
//! siblings, and validation is advisory: an out-of-range value stays in the
//! draft with a field-keyed error until the field is edited back into range.
//! Only the explicit save action checks that no errors remain.

use std::collections::BTreeMap;

use widget_config::{
    validate, Advanced, Appearance, Branding, Consent, Messages, WidgetConfig,
};

use crate::error::EditorError;
use crate::Result;

/// In-memory draft of one widget configuration.
#[derive(Debug, Clone)]
pub struct SettingsDraft {
    config: WidgetConfig,
    dirty: bool,
    /// Outstanding validation errors keyed `"<section>.<field>"`.
    errors: BTreeMap<String, String>,
}

impl SettingsDraft {
    /// Start a draft from a loaded configuration.
    pub fn new(config: WidgetConfig) -> Self {
        Self {
            config,
            dirty: false,
            errors: BTreeMap::new(),
        }
    }

    /// The current draft document.
    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    /// True once any edit was made since load or the last confirmed save.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Outstanding field errors, keyed by dotted field path.
    pub fn field_errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    /// The error for one field, if any.
    pub fn field_error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    /// Replace the appearance section.
    pub fn update_appearance(&mut self, appearance: Appearance) {
        self.config.appearance = appearance;
        self.touch("appearance");
    }

    /// Replace the messages section.
    pub fn update_messages(&mut self, messages: Messages) {
        self.config.messages = messages;
        self.touch("messages");
    }

    /// Replace the branding section.
    pub fn update_branding(&mut self, branding: Branding) {
        self.config.branding = branding;
        self.touch("branding");
    }

    /// Replace the advanced section.
    pub fn update_advanced(&mut self, advanced: Advanced) {
        self.config.advanced = advanced;
        self.touch("advanced");
    }

    /// Replace the consent section.
    pub fn update_consent(&mut self, consent: Consent) {
        self.config.consent = consent;
        self.touch("consent");
    }

    /// Update name, description, status, or prompt reference.
    pub fn update_meta(
        &mut self,
        name: String,
        description: String,
        prompt_id: Option<String>,
    ) {
        self.config.name = name;
        self.config.description = description;
        self.config.prompt_id = prompt_id;
        self.dirty = true;
    }

    /// Whether another suggested response can be added.
    pub fn can_add_suggested_response(&self) -> bool {
        self.config.messages.suggested_responses.len()
            < widget_config::validate::MAX_SUGGESTED_RESPONSES
    }

    /// Append a suggested response. Rejected once the list holds 5 entries.
    pub fn add_suggested_response(&mut self, text: impl Into<String>) -> Result<()> {
        if !self.can_add_suggested_response() {
            return Err(EditorError::SuggestedResponseLimit);
        }
        self.config.messages.suggested_responses.push(text.into());
        self.touch("messages");
        Ok(())
    }

    /// Edit a suggested response in place.
    pub fn edit_suggested_response(&mut self, index: usize, text: impl Into<String>) -> Result<()> {
        let responses = &mut self.config.messages.suggested_responses;
        let slot = responses
            .get_mut(index)
            .ok_or(EditorError::IndexOutOfRange(index))?;
        *slot = text.into();
        self.touch("messages");
        Ok(())
    }

    /// Remove a suggested response; entries after it shift down one index.
    pub fn remove_suggested_response(&mut self, index: usize) -> Result<()> {
        let responses = &mut self.config.messages.suggested_responses;
        if index >= responses.len() {
            return Err(EditorError::IndexOutOfRange(index));
        }
        responses.remove(index);
        self.touch("messages");
        Ok(())
    }

    /// The single explicit save action: returns the full document for a
    /// whole-document PUT. Fails while any field error is outstanding; the
    /// draft is left untouched either way so a failed persistence call can
    /// simply be retried.
    pub fn save(&self) -> Result<WidgetConfig> {
        if !self.errors.is_empty() {
            return Err(EditorError::ValidationPending {
                count: self.errors.len(),
            });
        }
        Ok(self.config.clone())
    }

    /// Clear the unsaved-changes flag after a confirmed persistence call.
    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    /// Re-validate the edited section and refresh its error entries, leaving
    /// other sections' errors alone.
    fn touch(&mut self, section: &str) {
        self.dirty = true;

        let prefix = format!("{section}.");
        self.errors.retain(|field, _| !field.starts_with(&prefix));

        for error in validate(&self.config) {
            if error.field.starts_with(&prefix) {
                self.errors.insert(error.field, error.message);
            }
        }
    }
}
