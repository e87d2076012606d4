//! The avatar/logo zoom-and-position dialog.
//!
//! The modal owns a local draft of the image settings, re-seeded from the
//! parent's saved settings every time it opens. Nothing reaches the parent
//! until `apply`; closing any other way discards the draft.

use widget_config::validate::{MAX_ZOOM, MIN_ZOOM};
use widget_config::ImageSettings;

/// Zoom slider/stepper increment.
const ZOOM_STEP: f64 = 0.1;

/// Which image(s) the dialog is editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdjustContext {
    Avatar,
    Logo,
    /// Avatar and logo together, e.g. the header preview.
    Combined,
}

impl AdjustContext {
    /// Whether the avatar controls are shown in this context.
    pub fn edits_avatar(&self) -> bool {
        matches!(self, AdjustContext::Avatar | AdjustContext::Combined)
    }

    /// Whether the logo controls are shown in this context.
    pub fn edits_logo(&self) -> bool {
        matches!(self, AdjustContext::Logo | AdjustContext::Combined)
    }
}

/// Local state of the image adjustment dialog.
#[derive(Debug, Clone)]
pub struct ImageAdjustModal {
    open: bool,
    context: AdjustContext,
    draft: ImageSettings,
}

impl Default for ImageAdjustModal {
    fn default() -> Self {
        Self {
            open: false,
            context: AdjustContext::Combined,
            draft: ImageSettings::default(),
        }
    }
}

impl ImageAdjustModal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the dialog, seeding the draft from the parent's saved settings.
    ///
    /// Re-seeds on every open, so edits discarded in a previous open/close
    /// cycle can never leak into the next one.
    pub fn open(&mut self, context: AdjustContext, initial: &ImageSettings) {
        self.open = true;
        self.context = context;
        self.draft = initial.clone();
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn context(&self) -> AdjustContext {
        self.context
    }

    /// The current draft values shown by the controls.
    pub fn draft(&self) -> &ImageSettings {
        &self.draft
    }

    /// Set the avatar zoom directly (slider). Clamped to [0.5, 3.0].
    pub fn set_avatar_zoom(&mut self, zoom: f64) {
        self.draft.avatar_zoom = clamp_zoom(zoom);
    }

    /// Set the logo zoom directly (slider). Clamped to [0.5, 3.0].
    pub fn set_logo_zoom(&mut self, zoom: f64) {
        self.draft.logo_zoom = clamp_zoom(zoom);
    }

    /// Move the avatar zoom by whole 0.1 steps (+/- stepper buttons).
    /// Lands on the same clamped value the slider would show.
    pub fn step_avatar_zoom(&mut self, steps: i32) {
        self.draft.avatar_zoom = step_zoom(self.draft.avatar_zoom, steps);
    }

    /// Move the logo zoom by whole 0.1 steps.
    pub fn step_logo_zoom(&mut self, steps: i32) {
        self.draft.logo_zoom = step_zoom(self.draft.logo_zoom, steps);
    }

    pub fn set_avatar_offset(&mut self, x: f64, y: f64) {
        self.draft.avatar_offset_x = x;
        self.draft.avatar_offset_y = y;
    }

    pub fn set_logo_offset(&mut self, x: f64, y: f64) {
        self.draft.logo_offset_x = x;
        self.draft.logo_offset_y = y;
    }

    /// Restore built-in defaults (zoom 1.0, offsets 0) to the draft only.
    /// The parent's saved settings are untouched until `apply`.
    pub fn reset(&mut self) {
        self.draft = ImageSettings::default();
    }

    /// Confirm: close the dialog and hand the draft to the caller, which
    /// writes it into the parent settings draft.
    pub fn apply(&mut self) -> Option<ImageSettings> {
        if !self.open {
            return None;
        }
        self.open = false;
        Some(self.draft.clone())
    }

    /// Close without saving (backdrop click, explicit close). The draft is
    /// discarded.
    pub fn close(&mut self) {
        self.open = false;
    }
}

fn clamp_zoom(zoom: f64) -> f64 {
    round_step(zoom.clamp(MIN_ZOOM, MAX_ZOOM))
}

fn step_zoom(current: f64, steps: i32) -> f64 {
    clamp_zoom(current + f64::from(steps) * ZOOM_STEP)
}

/// Snap to one decimal so stepper and slider agree despite float math.
fn round_step(zoom: f64) -> f64 {
    (zoom * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn saved_settings() -> ImageSettings {
        ImageSettings {
            avatar_zoom: 1.5,
            avatar_offset_x: 4.0,
            avatar_offset_y: -2.0,
            logo_zoom: 2.0,
            logo_offset_x: 0.0,
            logo_offset_y: 0.0,
        }
    }

    #[test]
    fn test_open_seeds_from_initial() {
        let mut modal = ImageAdjustModal::new();
        modal.open(AdjustContext::Avatar, &saved_settings());
        assert!(modal.is_open());
        assert_eq!(modal.draft().avatar_zoom, 1.5);
    }

    #[test]
    fn test_reopen_discards_previous_draft() {
        let saved = saved_settings();
        let mut modal = ImageAdjustModal::new();

        modal.open(AdjustContext::Avatar, &saved);
        modal.set_avatar_zoom(2.8);
        modal.close();

        // Second open re-seeds from the last saved settings, not the
        // discarded draft.
        modal.open(AdjustContext::Avatar, &saved);
        assert_eq!(modal.draft().avatar_zoom, 1.5);
    }

    #[test]
    fn test_zoom_clamped_both_ends() {
        let mut modal = ImageAdjustModal::new();
        modal.open(AdjustContext::Combined, &ImageSettings::default());

        modal.set_avatar_zoom(5.0);
        assert_eq!(modal.draft().avatar_zoom, 3.0);

        modal.set_logo_zoom(0.1);
        assert_eq!(modal.draft().logo_zoom, 0.5);
    }

    #[test]
    fn test_stepper_and_slider_agree() {
        let mut modal = ImageAdjustModal::new();
        modal.open(AdjustContext::Avatar, &ImageSettings::default());

        modal.step_avatar_zoom(3);
        assert_eq!(modal.draft().avatar_zoom, 1.3);

        modal.step_avatar_zoom(-10);
        assert_eq!(modal.draft().avatar_zoom, 0.5);

        // Stepping past the maximum lands on the clamp, same as the slider.
        modal.step_avatar_zoom(100);
        assert_eq!(modal.draft().avatar_zoom, 3.0);
    }

    #[test]
    fn test_reset_restores_defaults_in_draft_only() {
        let saved = saved_settings();
        let mut modal = ImageAdjustModal::new();
        modal.open(AdjustContext::Combined, &saved);

        modal.reset();
        assert_eq!(modal.draft(), &ImageSettings::default());
        // Reset does not close or apply; the parent's settings are not
        // represented here and stay whatever they were.
        assert!(modal.is_open());
    }

    #[test]
    fn test_apply_returns_draft_and_closes() {
        let mut modal = ImageAdjustModal::new();
        modal.open(AdjustContext::Logo, &ImageSettings::default());
        modal.set_logo_zoom(2.5);
        modal.set_logo_offset(10.0, -5.0);

        let applied = modal.apply().unwrap();
        assert_eq!(applied.logo_zoom, 2.5);
        assert_eq!(applied.logo_offset_x, 10.0);
        assert!(!modal.is_open());

        // Apply on a closed dialog is a no-op.
        assert!(modal.apply().is_none());
    }

    #[test]
    fn test_context_visibility() {
        assert!(AdjustContext::Avatar.edits_avatar());
        assert!(!AdjustContext::Avatar.edits_logo());
        assert!(AdjustContext::Combined.edits_avatar());
        assert!(AdjustContext::Combined.edits_logo());
    }
}
