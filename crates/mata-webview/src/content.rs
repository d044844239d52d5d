//! Local content resolution for the static server.
//!
//! Maps request paths onto files under a root directory, read-only.

use std::path::{Path, PathBuf};

/// A resolved file and its MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub mime: &'static str,
    pub data: Vec<u8>,
}

/// Serves local files from a root directory.
///
/// A request for `/css/site.css` resolves to `{root}/css/site.css`; `/` and
/// directory paths resolve to their `index.html`.
#[derive(Debug, Clone)]
pub struct ContentProvider {
    root: PathBuf,
}

impl ContentProvider {
    /// Create a new content provider rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve an already percent-decoded request path.
    pub fn resolve(&self, path: &str) -> Option<Asset> {
        let clean = path.trim_start_matches('/');
        let mut file_path = self.root.join(clean);
        if clean.is_empty() || clean.ends_with('/') || file_path.is_dir() {
            file_path = file_path.join("index.html");
        }

        // Prevent directory traversal (including symlink bypass).
        // Canonicalize both paths to resolve symlinks, `..`, etc.
        let canonical_root = std::fs::canonicalize(&self.root).ok()?;
        let canonical_file = std::fs::canonicalize(&file_path).ok()?;
        if !canonical_file.starts_with(&canonical_root) || !canonical_file.is_file() {
            return None;
        }

        let data = std::fs::read(&canonical_file).ok()?;
        Some(Asset {
            mime: mime_from_extension(&canonical_file),
            data,
        })
    }

    /// The directory being served.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Guess MIME type from file extension.
fn mime_from_extension(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("html") | Some("htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js") | Some("mjs") => "text/javascript; charset=utf-8",
        Some("json") | Some("map") => "application/json",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("wasm") => "application/wasm",
        Some("ico") => "image/x-icon",
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",
        Some("otf") => "font/otf",
        Some("mp3") => "audio/mpeg",
        Some("ogg") => "audio/ogg",
        Some("wav") => "audio/wav",
        Some("mp4") => "video/mp4",
        Some("webm") => "video/webm",
        Some("webp") => "image/webp",
        Some("txt") => "text/plain; charset=utf-8",
        Some("xml") => "application/xml",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    /// A content root with an index, a stylesheet and a nested page.
    fn fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("index.html"), "<html>home</html>").unwrap();
        fs::write(dir.path().join("site.css"), "body{}").unwrap();
        fs::create_dir(dir.path().join("docs")).unwrap();
        fs::write(dir.path().join("docs").join("index.html"), "<html>docs</html>").unwrap();
        fs::write(dir.path().join("docs").join("guide.html"), "<html>guide</html>").unwrap();
        dir
    }

    #[test]
    fn root_resolves_to_index() {
        let dir = fixture();
        let cp = ContentProvider::new(dir.path());
        for path in ["", "/"] {
            let asset = cp.resolve(path).expect("index should resolve");
            assert_eq!(asset.mime, "text/html; charset=utf-8");
            assert_eq!(asset.data, b"<html>home</html>");
        }
    }

    #[test]
    fn directory_resolves_to_its_index() {
        let dir = fixture();
        let cp = ContentProvider::new(dir.path());
        assert_eq!(cp.resolve("/docs/").unwrap().data, b"<html>docs</html>");
        assert_eq!(cp.resolve("/docs").unwrap().data, b"<html>docs</html>");
    }

    #[test]
    fn nested_file_resolves() {
        let dir = fixture();
        let cp = ContentProvider::new(dir.path());
        let asset = cp.resolve("/docs/guide.html").unwrap();
        assert_eq!(asset.data, b"<html>guide</html>");
    }

    #[test]
    fn stylesheet_gets_css_mime() {
        let dir = fixture();
        let cp = ContentProvider::new(dir.path());
        assert_eq!(cp.resolve("site.css").unwrap().mime, "text/css; charset=utf-8");
    }

    // -----------------------------------------------------------------
    // Security: directory traversal
    // -----------------------------------------------------------------

    #[test]
    fn traversal_with_dotdot_is_blocked() {
        let dir = fixture();
        let cp = ContentProvider::new(dir.path().join("docs"));
        assert!(
            cp.resolve("../index.html").is_none(),
            "directory traversal with ../ must be blocked"
        );
        assert!(cp.resolve("../../etc/passwd").is_none());
    }

    #[test]
    fn absolute_path_stays_inside_root() {
        let dir = fixture();
        let cp = ContentProvider::new(dir.path());
        assert!(cp.resolve("/etc/passwd").is_none());
    }

    #[test]
    fn nested_traversal_is_blocked() {
        let dir = fixture();
        let cp = ContentProvider::new(dir.path().join("docs"));
        assert!(cp.resolve("docs/../../index.html").is_none());
    }

    #[test]
    fn nonexistent_file_returns_none() {
        let dir = fixture();
        let cp = ContentProvider::new(dir.path());
        assert!(cp.resolve("does_not_exist.html").is_none());
    }

    #[test]
    fn missing_root_returns_none() {
        let cp = ContentProvider::new("/definitely/not/a/mata/root");
        assert!(cp.resolve("/").is_none());
    }

    // -----------------------------------------------------------------
    // MIME types
    // -----------------------------------------------------------------

    #[test]
    fn mime_type_html() {
        assert_eq!(mime_from_extension(Path::new("test.html")), "text/html; charset=utf-8");
        assert_eq!(mime_from_extension(Path::new("TEST.HTM")), "text/html; charset=utf-8");
    }

    #[test]
    fn mime_type_javascript() {
        assert_eq!(
            mime_from_extension(Path::new("app.js")),
            "text/javascript; charset=utf-8"
        );
        assert_eq!(
            mime_from_extension(Path::new("module.mjs")),
            "text/javascript; charset=utf-8"
        );
    }

    #[test]
    fn mime_type_unknown_is_octet_stream() {
        assert_eq!(
            mime_from_extension(Path::new("data.xyz")),
            "application/octet-stream"
        );
        assert_eq!(
            mime_from_extension(Path::new("Makefile")),
            "application/octet-stream"
        );
    }
}
