//! Live preview engine for the admin console.
//!
//! Renders a deterministic simulation of an embedded chat widget from its
//! configuration (no network involved), and drives a simulated conversation
//! against the AI respond backend for realistic testing. The respond
//! backend sits behind the [`RespondClient`] trait so previews can run
//! against the real endpoint or a mock.

pub mod mock;
pub mod render;
pub mod respond;
pub mod session;

pub use mock::{
    DelayedRespondClient, EchoRespondClient, FailingRespondClient, RecordingRespondClient,
};
pub use render::{
    render, DeviceView, RenderState, RenderTree, ThemeHint, ThemeMode, WidgetMeta,
};
pub use respond::{HttpRespondClient, RespondClient, RespondError, RespondReply, RespondRequest};
pub use session::{PreviewSession, Sender, TranscriptEntry};
