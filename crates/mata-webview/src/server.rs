//! Loopback HTTP server for the bundled content directory.
//!
//! The listener is bound synchronously in [`StaticServer::start`], so the
//! port is accepting connections before the WebView navigates to it.
//! Requests are served by axum on the caller's tokio runtime.

use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use mata_common::errors::ShellError;
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tracing::{debug, error, info, warn};

use crate::content::ContentProvider;

/// A running content server.
pub struct StaticServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl StaticServer {
    /// Bind `127.0.0.1:0` and start serving `root` on `runtime`.
    pub fn start(runtime: &Handle, root: impl Into<PathBuf>) -> Result<Self, ShellError> {
        let content = ContentProvider::new(root);
        if !content.root().is_dir() {
            warn!(
                root = %content.root().display(),
                "Content directory not found, every request will 404"
            );
        }

        let listener = std::net::TcpListener::bind((Ipv4Addr::LOCALHOST, 0))?;
        listener.set_nonblocking(true)?;
        let addr = listener.local_addr()?;
        if addr.port() == 0 {
            return Err(ShellError::Server("listener reported port 0".into()));
        }

        let root_display = content.root().display().to_string();
        let router = router(content);
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        runtime.spawn(async move {
            let listener = match tokio::net::TcpListener::from_std(listener) {
                Ok(l) => l,
                Err(e) => {
                    error!(error = %e, "Content server could not adopt listener");
                    return;
                }
            };
            let shutdown = async {
                let _ = shutdown_rx.await;
            };
            if let Err(e) = axum::serve(listener, router)
                .with_graceful_shutdown(shutdown)
                .await
            {
                error!(error = %e, "Content server error");
            }
            debug!("Content server stopped");
        });

        info!(%addr, root = %root_display, "Content server listening");
        Ok(Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// `http://127.0.0.1:<port>`, without a trailing slash.
    pub fn origin(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// URL of the content root.
    pub fn url(&self) -> String {
        format!("{}/", self.origin())
    }

    /// Stop accepting connections. In-flight requests are allowed to finish.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            info!(addr = %self.addr, "Content server shutting down");
        }
    }
}

impl Drop for StaticServer {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn router(content: ContentProvider) -> Router {
    Router::new()
        .fallback(serve_asset)
        .with_state(Arc::new(content))
}

async fn serve_asset(
    State(content): State<Arc<ContentProvider>>,
    method: Method,
    uri: Uri,
) -> Response {
    if method != Method::GET && method != Method::HEAD {
        return (StatusCode::METHOD_NOT_ALLOWED, [(header::ALLOW, "GET, HEAD")]).into_response();
    }

    let path = match urlencoding::decode(uri.path()) {
        Ok(p) => p,
        Err(_) => return StatusCode::BAD_REQUEST.into_response(),
    };

    let path = path.into_owned();

    // Canonicalize and read block; keep them off the single worker.
    let lookup = {
        let path = path.clone();
        tokio::task::spawn_blocking(move || content.resolve(&path))
    };
    match lookup.await {
        Ok(Some(asset)) => ([(header::CONTENT_TYPE, asset.mime)], asset.data).into_response(),
        Ok(None) => {
            debug!(path = %path, "Asset not found");
            (StatusCode::NOT_FOUND, "Not Found").into_response()
        }
        Err(e) => {
            error!(path = %path, error = %e, "Asset lookup failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;

    fn content_root() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("index.html"), "<h1>mata</h1>").unwrap();
        fs::write(dir.path().join("app.js"), "console.log(1);").unwrap();
        fs::write(dir.path().join("with space.txt"), "spaced").unwrap();
        dir
    }

    async fn request(port: u16, method: &str, path: &str) -> String {
        let mut stream = TcpStream::connect(("127.0.0.1", port)).await.unwrap();
        let req = format!("{method} {path} HTTP/1.1\r\nHost: 127.0.0.1\r\nConnection: close\r\n\r\n");
        stream.write_all(req.as_bytes()).await.unwrap();
        let mut buf = Vec::new();
        stream.read_to_end(&mut buf).await.unwrap();
        String::from_utf8_lossy(&buf).into_owned()
    }

    #[tokio::test]
    async fn binds_nonzero_loopback_port() {
        let dir = content_root();
        let server = StaticServer::start(&Handle::current(), dir.path()).unwrap();
        assert_ne!(server.port(), 0);
        assert!(server.addr().ip().is_loopback());
        assert_eq!(server.url(), format!("http://127.0.0.1:{}/", server.port()));
    }

    #[tokio::test]
    async fn serves_index_at_root() {
        let dir = content_root();
        let server = StaticServer::start(&Handle::current(), dir.path()).unwrap();
        let response = request(server.port(), "GET", "/").await;
        assert!(response.starts_with("HTTP/1.1 200"), "{response}");
        assert!(response.to_ascii_lowercase().contains("content-type: text/html"));
        assert!(response.ends_with("<h1>mata</h1>"));
    }

    #[tokio::test]
    async fn serves_scripts_with_js_mime() {
        let dir = content_root();
        let server = StaticServer::start(&Handle::current(), dir.path()).unwrap();
        let response = request(server.port(), "GET", "/app.js").await;
        assert!(response.starts_with("HTTP/1.1 200"));
        assert!(response.to_ascii_lowercase().contains("content-type: text/javascript"));
    }

    #[tokio::test]
    async fn decodes_percent_encoded_paths() {
        let dir = content_root();
        let server = StaticServer::start(&Handle::current(), dir.path()).unwrap();
        let response = request(server.port(), "GET", "/with%20space.txt").await;
        assert!(response.starts_with("HTTP/1.1 200"));
        assert!(response.ends_with("spaced"));
    }

    #[tokio::test]
    async fn missing_file_is_404() {
        let dir = content_root();
        let server = StaticServer::start(&Handle::current(), dir.path()).unwrap();
        let response = request(server.port(), "GET", "/nope.html").await;
        assert!(response.starts_with("HTTP/1.1 404"));
    }

    #[tokio::test]
    async fn writes_are_rejected() {
        let dir = content_root();
        let server = StaticServer::start(&Handle::current(), dir.path()).unwrap();
        let response = request(server.port(), "POST", "/index.html").await;
        assert!(response.starts_with("HTTP/1.1 405"));
        assert!(response.to_ascii_lowercase().contains("allow: get, head"));
    }

    #[tokio::test]
    async fn concurrent_requests_all_served() {
        let dir = content_root();
        let server = StaticServer::start(&Handle::current(), dir.path()).unwrap();
        let port = server.port();
        let tasks: Vec<_> = (0..8)
            .map(|_| tokio::spawn(async move { request(port, "GET", "/app.js").await }))
            .collect();
        for task in tasks {
            let response = task.await.unwrap();
            assert!(response.starts_with("HTTP/1.1 200"), "{response}");
            assert!(response.ends_with("console.log(1);"));
        }
    }

    #[tokio::test]
    async fn head_request_is_served() {
        let dir = content_root();
        let server = StaticServer::start(&Handle::current(), dir.path()).unwrap();
        let response = request(server.port(), "HEAD", "/index.html").await;
        assert!(response.starts_with("HTTP/1.1 200"), "{response}");
        assert!(!response.contains("<h1>mata</h1>"));
    }

    #[tokio::test]
    async fn missing_root_still_starts() {
        let server =
            StaticServer::start(&Handle::current(), "/definitely/not/a/mata/root").unwrap();
        let response = request(server.port(), "GET", "/").await;
        assert!(response.starts_with("HTTP/1.1 404"));
    }
}
