//! The settings-to-preview projection.
//!
//! `render` is a pure function: identical inputs always produce an identical
//! tree. Anything time-dependent (the `auto` theme, the transcript) enters
//! through explicit parameters, never through clocks or globals.

use serde::Serialize;

use widget_config::{resolve_pack, AnimationSpeed, Placement, Theme, WidgetConfig};

use crate::session::TranscriptEntry;

/// Which device frame the preview simulates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceView {
    Desktop,
    Mobile,
}

/// Caller-supplied resolution for the `auto` theme (e.g. the operator's own
/// OS preference). Keeps the projection deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeHint {
    Light,
    Dark,
}

/// The theme mode after resolving `auto`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
}

/// Identity of the widget being previewed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetMeta {
    pub id: String,
    pub name: String,
}

/// Ephemeral view state fed into the projection alongside the config.
#[derive(Debug, Clone, Copy)]
pub struct RenderState<'a> {
    pub theme_hint: ThemeHint,
    pub transcript: &'a [TranscriptEntry],
    pub typing: bool,
    pub widget_open: bool,
    pub zoom_percent: u32,
}

impl<'a> RenderState<'a> {
    /// A fresh, open widget with an empty transcript.
    pub fn new(theme_hint: ThemeHint) -> Self {
        Self {
            theme_hint,
            transcript: &[],
            typing: false,
            widget_open: true,
            zoom_percent: 100,
        }
    }
}

/// The rendered simulation of one widget.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderTree {
    pub widget: WidgetMeta,
    pub frame: DeviceFrame,
    pub theme: ResolvedTheme,
    pub zoom_percent: u32,
    pub open: bool,
    pub header: Header,
    pub banner: Option<Banner>,
    pub chat_button: Option<ChatButton>,
    pub popup: Option<Popup>,
    pub conversation: Conversation,
    pub suggested_responses: Vec<String>,
    pub composer: Composer,
    pub footer: Option<Footer>,
    pub consent: Option<ConsentOverlay>,
}

/// Simulated device frame and the widget geometry inside it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceFrame {
    pub view: DeviceView,
    pub frame_width: u32,
    pub frame_height: u32,
    pub widget_width: u32,
    pub widget_height: u32,
    pub placement: Placement,
}

/// Colors and motion resolved from the appearance section.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedTheme {
    pub mode: ThemeMode,
    pub theme_color: String,
    pub secondary_color: String,
    pub use_gradient: bool,
    pub backdrop_blur: bool,
    pub border_radius: u32,
    pub animation_ms: u32,
    /// Opaque custom CSS passed through verbatim.
    pub custom_css: String,
}

/// Widget header bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    pub title: String,
    pub assistant_name: String,
    pub online_label: String,
    pub avatar: Option<ImageTransform>,
    pub show_close_button: bool,
    pub show_menu: bool,
    pub menu_label: String,
}

/// An image with the stored zoom/offset transform applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageTransform {
    pub url: String,
    pub zoom: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    pub size: u32,
}

/// Informational banner under the header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Banner {
    pub text: String,
}

/// The floating button shown while the widget is closed; the popup bubble
/// attaches to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatButton {
    pub size: u32,
    pub placement: Placement,
}

/// Teaser bubble shown beside the closed chat button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Popup {
    pub text: String,
    pub delay_ms: u32,
}

/// The message list: welcome bubble, transcript, typing indicator.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub welcome_message: String,
    pub entries: Vec<TranscriptEntry>,
    pub typing_indicator: Option<String>,
    pub disclaimer: Option<String>,
}

/// Input row at the bottom of the widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Composer {
    pub placeholder: String,
    pub send_label: String,
}

/// Branding footer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Footer {
    pub powered_by_text: String,
    pub company_name: String,
    pub logo: Option<ImageTransform>,
}

/// GDPR consent overlay shown before the first message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsentOverlay {
    pub title: String,
    pub description: String,
    pub privacy_url: String,
    pub cookies_url: String,
    pub accept_label: String,
    pub decline_label: String,
}

const DESKTOP_FRAME: (u32, u32) = (1280, 800);
const MOBILE_FRAME: (u32, u32) = (375, 720);
/// Horizontal margin kept around the widget inside the mobile frame.
const MOBILE_MARGIN: u32 = 16;

/// Project a configuration into its rendered simulation.
pub fn render(
    widget: &WidgetMeta,
    config: &WidgetConfig,
    view: DeviceView,
    state: &RenderState<'_>,
) -> RenderTree {
    let code = config.advanced.language.pack_code();
    let pack = resolve_pack(config, code);

    // The messages section holds the admin-edited texts for the base locale;
    // other locales read from the resolved pack.
    let base_locale = code == "da";
    let pick = |edited: &str, packed: &str| -> String {
        if base_locale {
            edited.to_string()
        } else {
            packed.to_string()
        }
    };

    let welcome_message = pick(&config.messages.welcome_message, &pack.welcome_message);
    let placeholder = pick(&config.messages.input_placeholder, &pack.input_placeholder);
    let typing_text = pick(&config.messages.typing_text, &pack.typing_text);
    let popup_text = pick(&config.messages.popup_message, &pack.popup_message);
    let banner_text = pick(&config.messages.banner_text, &pack.banner_text);

    let frame = device_frame(config, view);
    let theme = resolved_theme(config, state.theme_hint);

    let avatar = image_transform(
        &config.branding.avatar_url,
        config.branding.image_settings.avatar_zoom,
        config.branding.image_settings.avatar_offset_x,
        config.branding.image_settings.avatar_offset_y,
        config.branding.icon_sizes.header_avatar,
    );
    let logo = image_transform(
        &config.branding.logo_url,
        config.branding.image_settings.logo_zoom,
        config.branding.image_settings.logo_offset_x,
        config.branding.image_settings.logo_offset_y,
        config.branding.icon_sizes.footer_logo,
    );

    let header = Header {
        title: config.branding.title.clone(),
        assistant_name: config.branding.assistant_name.clone(),
        online_label: pack.online_status.clone(),
        avatar,
        show_close_button: config.advanced.show_close_button,
        show_menu: config.advanced.show_conversation_history
            || config.advanced.show_new_chat_button,
        menu_label: pack.menu_label.clone(),
    };

    let banner = (!banner_text.is_empty()).then(|| Banner { text: banner_text });

    // The floating button and its teaser bubble only exist while the widget
    // is closed.
    let chat_button = (!state.widget_open).then(|| ChatButton {
        size: config.branding.icon_sizes.chat_button,
        placement: config.appearance.placement,
    });
    let popup = (!state.widget_open && !popup_text.is_empty()).then(|| Popup {
        text: popup_text,
        delay_ms: config.messages.popup_delay,
    });

    let disclaimer = (!config.messages.disclaimer_text.is_empty())
        .then(|| config.messages.disclaimer_text.clone());

    let conversation = Conversation {
        welcome_message,
        entries: state.transcript.to_vec(),
        typing_indicator: state.typing.then(|| typing_text),
        disclaimer,
    };

    // Quick-reply chips disappear after the first user turn.
    let has_user_turn = state
        .transcript
        .iter()
        .any(|entry| entry.sender == crate::session::Sender::User);
    let suggested_responses = if has_user_turn {
        Vec::new()
    } else {
        config.messages.suggested_responses.clone()
    };

    let composer = Composer {
        placeholder,
        send_label: pack.send_button.clone(),
    };

    let footer = config.branding.show_branding.then(|| Footer {
        powered_by_text: config.branding.powered_by_text.clone(),
        company_name: config.branding.company_name.clone(),
        logo,
    });

    let consent = config.consent.enabled.then(|| ConsentOverlay {
        title: config.consent.title.clone(),
        description: config.consent.description.clone(),
        privacy_url: config.consent.privacy_url.clone(),
        cookies_url: config.consent.cookies_url.clone(),
        accept_label: pack.consent_accept_button.clone(),
        decline_label: pack.consent_decline_button.clone(),
    });

    RenderTree {
        widget: widget.clone(),
        frame,
        theme,
        zoom_percent: state.zoom_percent,
        open: state.widget_open,
        header,
        banner,
        chat_button,
        popup,
        conversation,
        suggested_responses,
        composer,
        footer,
        consent,
    }
}

fn device_frame(config: &WidgetConfig, view: DeviceView) -> DeviceFrame {
    match view {
        DeviceView::Desktop => DeviceFrame {
            view,
            frame_width: DESKTOP_FRAME.0,
            frame_height: DESKTOP_FRAME.1,
            widget_width: config.appearance.width,
            widget_height: config.appearance.height,
            placement: config.appearance.placement,
        },
        DeviceView::Mobile => {
            // On a phone the widget is capped to the frame, keeping a margin.
            let max_width = MOBILE_FRAME.0 - 2 * MOBILE_MARGIN;
            let max_height = MOBILE_FRAME.1 - 2 * MOBILE_MARGIN;
            DeviceFrame {
                view,
                frame_width: MOBILE_FRAME.0,
                frame_height: MOBILE_FRAME.1,
                widget_width: config.appearance.width.min(max_width),
                widget_height: config.appearance.height.min(max_height),
                placement: config.appearance.placement,
            }
        }
    }
}

fn resolved_theme(config: &WidgetConfig, hint: ThemeHint) -> ResolvedTheme {
    let mode = match config.appearance.theme {
        Theme::Light => ThemeMode::Light,
        Theme::Dark => ThemeMode::Dark,
        Theme::Auto => match hint {
            ThemeHint::Light => ThemeMode::Light,
            ThemeHint::Dark => ThemeMode::Dark,
        },
    };

    let animation_ms = match config.appearance.animation_speed {
        AnimationSpeed::Slow => 400,
        AnimationSpeed::Normal => 250,
        AnimationSpeed::Fast => 120,
    };

    ResolvedTheme {
        mode,
        theme_color: config.appearance.theme_color.clone(),
        secondary_color: config.appearance.secondary_color.clone(),
        use_gradient: config.appearance.use_gradient,
        backdrop_blur: config.appearance.backdrop_blur,
        border_radius: config.appearance.border_radius,
        animation_ms,
        custom_css: config.appearance.custom_css.clone(),
    }
}

fn image_transform(
    url: &str,
    zoom: f64,
    offset_x: f64,
    offset_y: f64,
    size: u32,
) -> Option<ImageTransform> {
    if url.is_empty() {
        return None;
    }
    Some(ImageTransform {
        url: url.to_string(),
        zoom,
        offset_x,
        offset_y,
        size,
    })
}
