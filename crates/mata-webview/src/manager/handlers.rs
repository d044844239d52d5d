use tracing::{debug, warn};
use wry::WebViewBuilder;

use crate::events::{EventSink, PageLoadState, WebViewEvent};

use super::WebViewManager;

// =============================================================================
// NAVIGATION ALLOWLIST
// =============================================================================

/// Check whether `url` may be loaded: `about:blank`, or anything on
/// `origin` (the content server).
pub fn is_navigation_allowed(url: &str, origin: Option<&str>) -> bool {
    if url == "about:blank" {
        return true;
    }
    match origin {
        Some(origin) => {
            url == origin
                || url
                    .strip_prefix(origin)
                    .is_some_and(|rest| rest.starts_with(['/', '?', '#']))
        }
        None => false,
    }
}

// =============================================================================
// HANDLER ATTACHMENTS
// =============================================================================

impl WebViewManager {
    pub(super) fn attach_ipc_handler<'a>(
        builder: WebViewBuilder<'a>,
        sink: EventSink,
    ) -> WebViewBuilder<'a> {
        builder.with_ipc_handler(move |request| {
            let body = request.body().to_string();

            if serde_json::from_str::<serde_json::Value>(&body).is_err() {
                warn!(body_len = body.len(), "IPC message rejected: invalid JSON");
                return;
            }

            debug!(body_len = body.len(), "IPC message from JS");
            sink(WebViewEvent::IpcMessage { body });
        })
    }

    pub(super) fn attach_page_load_handler<'a>(
        builder: WebViewBuilder<'a>,
        sink: EventSink,
    ) -> WebViewBuilder<'a> {
        builder.with_on_page_load_handler(move |event, url| {
            let state = PageLoadState::from(event);
            debug!(?state, url = %url, "page load");
            sink(WebViewEvent::PageLoad { state, url });
        })
    }

    pub(super) fn attach_title_handler<'a>(
        builder: WebViewBuilder<'a>,
        sink: EventSink,
    ) -> WebViewBuilder<'a> {
        builder.with_document_title_changed_handler(move |title| {
            debug!(title = %title, "title changed");
            sink(WebViewEvent::TitleChanged { title });
        })
    }

    pub(super) fn attach_navigation_handler<'a>(
        builder: WebViewBuilder<'a>,
        sink: EventSink,
        origin: Option<String>,
    ) -> WebViewBuilder<'a> {
        builder.with_navigation_handler(move |url| {
            if !is_navigation_allowed(&url, origin.as_deref()) {
                warn!(url = %url, "navigation blocked: outside content origin");
                return false;
            }
            sink(WebViewEvent::NavigationRequested { url });
            true
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
