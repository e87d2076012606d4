//! Preview session state: transcript, typing, device view, zoom.
//!
//! The session owns the ephemeral conversation used for visual QA. Send
//! failures become assistant turns with canned text; they never surface as
//! errors and never roll back the operator's own message.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::render::{render, DeviceView, RenderState, RenderTree, ThemeHint, WidgetMeta};
use crate::respond::{RespondClient, RespondError, RespondRequest};
use widget_config::WidgetConfig;

/// Zoom bounds in percent.
const MIN_ZOOM_PERCENT: u32 = 50;
const MAX_ZOOM_PERCENT: u32 = 150;
const ZOOM_STEP_PERCENT: u32 = 10;

/// Who authored a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

/// One turn in the simulated conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptEntry {
    pub id: String,
    pub text: String,
    pub sender: Sender,
    pub timestamp: u64,
}

/// Canned assistant text when the widget has no prompt configured.
pub const CONFIG_MISSING_TEXT: &str =
    "This widget has no AI prompt configured yet. Add a prompt under the widget's \
     advanced settings to test replies.";
/// Canned assistant text for a 404 from the respond backend.
pub const WIDGET_NOT_FOUND_TEXT: &str =
    "This widget could not be found. It may have been deleted.";
/// Canned assistant text for a 400 from the respond backend.
pub const BAD_CONFIG_TEXT: &str = "The AI configuration for this widget is incomplete.";
/// Canned assistant text for any other failure.
pub const PREVIEW_DISCLAIMER_TEXT: &str =
    "Preview mode: a live reply is unavailable right now. Your message was kept above.";

/// A live preview conversation for one widget.
pub struct PreviewSession {
    widget: WidgetMeta,
    prompt_id: Option<String>,
    client: Box<dyn RespondClient>,
    conversation_id: String,
    transcript: Vec<TranscriptEntry>,
    input_buffer: String,
    typing: bool,
    widget_open: bool,
    menu_open: bool,
    history_open: bool,
    device_view: DeviceView,
    zoom_percent: u32,
}

impl PreviewSession {
    /// Start a session for a widget. The prompt reference is taken from the
    /// configuration at session start.
    pub fn new(widget: WidgetMeta, config: &WidgetConfig, client: Box<dyn RespondClient>) -> Self {
        Self {
            widget,
            prompt_id: config.prompt_id.clone(),
            client,
            conversation_id: format!("preview-{}", Uuid::new_v4()),
            transcript: Vec::new(),
            input_buffer: String::new(),
            typing: false,
            widget_open: true,
            menu_open: false,
            history_open: false,
            device_view: DeviceView::Desktop,
            zoom_percent: 100,
        }
    }

    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    pub fn is_typing(&self) -> bool {
        self.typing
    }

    pub fn device_view(&self) -> DeviceView {
        self.device_view
    }

    pub fn zoom_percent(&self) -> u32 {
        self.zoom_percent
    }

    pub fn is_widget_open(&self) -> bool {
        self.widget_open
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn is_history_open(&self) -> bool {
        self.history_open
    }

    pub fn input(&self) -> &str {
        &self.input_buffer
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input_buffer = text.into();
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    pub fn toggle_history(&mut self) {
        self.history_open = !self.history_open;
    }

    pub fn set_widget_open(&mut self, open: bool) {
        self.widget_open = open;
    }

    /// Send one message as the simulated end user.
    ///
    /// The user turn is appended first and never rolled back. Without a
    /// prompt reference this fast-fails with a canned configuration-error
    /// turn and no network call; otherwise one call goes out and the reply
    /// (or a canned text classified by the HTTP status) is appended.
    pub async fn send_message(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.push_turn(Sender::User, text.clone());
        self.input_buffer.clear();

        if self.prompt_id.is_none() {
            debug!(widget = %self.widget.id, "Preview send without prompt configured");
            self.push_turn(Sender::Assistant, CONFIG_MISSING_TEXT.to_string());
            return;
        }

        self.typing = true;
        let request = RespondRequest {
            message: text,
            widget_id: self.widget.id.clone(),
            // Synthetic end-user id; the prompt is resolved server-side from
            // the widget configuration.
            user_id: "preview".to_string(),
            conversation_id: self.conversation_id.clone(),
        };

        let reply = match self.client.respond(request).await {
            Ok(reply) => reply.reply,
            Err(err) => {
                warn!(widget = %self.widget.id, error = %err, "Preview respond call failed");
                classify_failure(&err).to_string()
            }
        };

        self.typing = false;
        self.push_turn(Sender::Assistant, reply);
    }

    /// Switch the simulated device. Reopens the widget and closes transient
    /// menus; the transcript is preserved.
    pub fn set_device_view(&mut self, view: DeviceView) {
        self.device_view = view;
        self.widget_open = true;
        self.menu_open = false;
        self.history_open = false;
    }

    /// Clear the whole conversation state in one step.
    pub fn reset(&mut self) {
        self.transcript.clear();
        self.input_buffer.clear();
        self.typing = false;
        self.menu_open = false;
        self.history_open = false;
    }

    /// Zoom in one step, clamped at 150%.
    pub fn zoom_in(&mut self) {
        self.zoom_percent = (self.zoom_percent + ZOOM_STEP_PERCENT).min(MAX_ZOOM_PERCENT);
    }

    /// Zoom out one step, clamped at 50%.
    pub fn zoom_out(&mut self) {
        self.zoom_percent = self
            .zoom_percent
            .saturating_sub(ZOOM_STEP_PERCENT)
            .max(MIN_ZOOM_PERCENT);
    }

    /// Render the current state against a configuration.
    pub fn render(&self, config: &WidgetConfig, theme_hint: ThemeHint) -> RenderTree {
        let state = RenderState {
            theme_hint,
            transcript: &self.transcript,
            typing: self.typing,
            widget_open: self.widget_open,
            zoom_percent: self.zoom_percent,
        };
        render(&self.widget, config, self.device_view, &state)
    }

    fn push_turn(&mut self, sender: Sender, text: String) {
        self.transcript.push(TranscriptEntry {
            id: Uuid::new_v4().to_string(),
            text,
            sender,
            timestamp: unix_timestamp(),
        });
    }
}

/// Map a respond failure to its canned assistant text, classifying by the
/// numeric HTTP status.
fn classify_failure(err: &RespondError) -> &'static str {
    match err.status_code() {
        Some(404) => WIDGET_NOT_FOUND_TEXT,
        Some(400) => BAD_CONFIG_TEXT,
        _ => PREVIEW_DISCLAIMER_TEXT,
    }
}

fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{EchoRespondClient, FailingRespondClient, RecordingRespondClient};

    fn meta() -> WidgetMeta {
        WidgetMeta {
            id: "w-1".to_string(),
            name: "Support".to_string(),
        }
    }

    fn config_with_prompt() -> WidgetConfig {
        let mut config = WidgetConfig::default();
        config.prompt_id = Some("prompt-1".to_string());
        config
    }

    #[tokio::test]
    async fn test_send_appends_user_and_assistant_turns() {
        let mut session = PreviewSession::new(
            meta(),
            &config_with_prompt(),
            Box::new(EchoRespondClient::new()),
        );

        session.send_message("Hej!").await;
        assert_eq!(session.transcript().len(), 2);
        assert_eq!(session.transcript()[0].sender, Sender::User);
        assert_eq!(session.transcript()[0].text, "Hej!");
        assert_eq!(session.transcript()[1].sender, Sender::Assistant);
        assert_eq!(session.transcript()[1].text, "Hej!");
        assert!(!session.is_typing());
    }

    #[tokio::test]
    async fn test_send_uses_plain_preview_user_id() {
        let client = RecordingRespondClient::new();
        let mut session =
            PreviewSession::new(meta(), &config_with_prompt(), Box::new(client.clone()));

        session.send_message("Hej").await;
        let request = client.last_request().unwrap();
        // The prompt reference stays out of the request; the backend resolves
        // it from the stored configuration.
        assert_eq!(request.user_id, "preview");
        assert_eq!(request.widget_id, "w-1");
    }

    #[tokio::test]
    async fn test_missing_prompt_fast_fails_without_network() {
        // A failing client proves the network is never touched: if it were
        // called, the canned text would be the 500 disclaimer instead.
        let mut session = PreviewSession::new(
            meta(),
            &WidgetConfig::default(),
            Box::new(FailingRespondClient::new(500, "boom")),
        );

        session.send_message("Hej!").await;
        assert_eq!(session.transcript().len(), 2);
        assert_eq!(session.transcript()[1].text, CONFIG_MISSING_TEXT);
    }

    #[tokio::test]
    async fn test_failure_classification_by_status() {
        for (code, expected) in [
            (404, WIDGET_NOT_FOUND_TEXT),
            (400, BAD_CONFIG_TEXT),
            (500, PREVIEW_DISCLAIMER_TEXT),
            (503, PREVIEW_DISCLAIMER_TEXT),
        ] {
            let mut session = PreviewSession::new(
                meta(),
                &config_with_prompt(),
                Box::new(FailingRespondClient::new(code, "err")),
            );
            session.send_message("Hej").await;

            // The user turn survives; the canned text lands as the reply.
            assert_eq!(session.transcript()[0].sender, Sender::User);
            assert_eq!(session.transcript()[1].text, expected, "status {code}");
            assert!(!session.is_typing());
        }
    }

    #[tokio::test]
    async fn test_device_switch_preserves_transcript() {
        let mut session = PreviewSession::new(
            meta(),
            &config_with_prompt(),
            Box::new(EchoRespondClient::new()),
        );
        session.send_message("Første").await;
        session.send_message("Anden").await;
        let before = session.transcript().to_vec();

        session.set_widget_open(false);
        session.toggle_menu();
        session.set_device_view(DeviceView::Mobile);

        assert_eq!(session.transcript(), before.as_slice());
        assert!(session.is_widget_open());
        assert!(!session.is_menu_open());

        session.set_device_view(DeviceView::Desktop);
        assert_eq!(session.transcript(), before.as_slice());
    }

    #[tokio::test]
    async fn test_reset_clears_everything_at_once() {
        let mut session = PreviewSession::new(
            meta(),
            &config_with_prompt(),
            Box::new(EchoRespondClient::new()),
        );
        session.send_message("Hej").await;
        session.set_input("half-typed");
        session.toggle_menu();
        session.toggle_history();

        session.reset();
        assert!(session.transcript().is_empty());
        assert!(session.input().is_empty());
        assert!(!session.is_typing());
        assert!(!session.is_menu_open());
        assert!(!session.is_history_open());
    }

    #[tokio::test]
    async fn test_zoom_clamps_in_steps_of_ten() {
        let mut session = PreviewSession::new(
            meta(),
            &config_with_prompt(),
            Box::new(EchoRespondClient::new()),
        );
        assert_eq!(session.zoom_percent(), 100);

        for _ in 0..10 {
            session.zoom_in();
        }
        assert_eq!(session.zoom_percent(), 150);

        for _ in 0..20 {
            session.zoom_out();
        }
        assert_eq!(session.zoom_percent(), 50);

        session.zoom_in();
        assert_eq!(session.zoom_percent(), 60);
    }

    #[tokio::test]
    async fn test_session_render_reflects_state() {
        let config = config_with_prompt();
        let mut session =
            PreviewSession::new(meta(), &config, Box::new(EchoRespondClient::new()));
        session.send_message("Hej").await;

        let tree = session.render(&config, ThemeHint::Light);
        assert_eq!(tree.conversation.entries.len(), 2);
        assert_eq!(tree.frame.view, DeviceView::Desktop);
        // Chips are gone after the first user turn.
        assert!(tree.suggested_responses.is_empty());
    }
}
