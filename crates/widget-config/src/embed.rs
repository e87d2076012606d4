//! The embed artifact handed to third-party site owners.

/// Build the script tag a site owner pastes into their page.
///
/// This string is the only persisted wire format exposed outside the admin
/// console, so its shape must stay stable.
pub fn embed_tag(base_url: &str, widget_id: &str) -> String {
    let base = base_url.trim_end_matches('/');
    format!(r#"<script src="{base}/api/widget-embed/{widget_id}" async></script>"#)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embed_tag_shape() {
        let tag = embed_tag("https://admin.example.dk", "w-123");
        assert_eq!(
            tag,
            r#"<script src="https://admin.example.dk/api/widget-embed/w-123" async></script>"#
        );
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let tag = embed_tag("https://admin.example.dk/", "w-123");
        assert!(!tag.contains(".dk//api"));
    }
}
