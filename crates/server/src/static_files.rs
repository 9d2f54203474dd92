//! Static file serving for the demo SPA

use std::path::{Component, Path, PathBuf};

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use tracing::warn;

/// Serves the single-page client bundle from a directory on disk.
///
/// Unmatched asset paths fall back to the entry file so client-side routing
/// survives a refresh.
pub struct StaticAssets {
    dir: PathBuf,
}

impl StaticAssets {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Serve the SPA entry file.
    pub async fn index(&self) -> Response {
        self.file(Path::new("index.html"), false).await
    }

    /// Serve an asset by request path, falling back to the entry file when
    /// the asset does not exist.
    pub async fn serve(&self, request_path: &str) -> Response {
        let trimmed = request_path.trim_start_matches('/');
        if trimmed.is_empty() {
            return self.index().await;
        }

        let Some(relative) = sanitize(trimmed) else {
            return (StatusCode::NOT_FOUND, "File not found").into_response();
        };

        self.file(&relative, true).await
    }

    async fn file(&self, relative: &Path, fall_back: bool) -> Response {
        let full = self.dir.join(relative);

        match tokio::fs::read(&full).await {
            Ok(bytes) => {
                let content_type = mime_guess::from_path(&full).first_or_octet_stream();
                (
                    StatusCode::OK,
                    [(header::CONTENT_TYPE, content_type.to_string())],
                    bytes,
                )
                    .into_response()
            }
            Err(_) if fall_back => Box::pin(self.index()).await,
            Err(e) => {
                warn!("SPA entry file {} unreadable: {}", full.display(), e);
                (StatusCode::NOT_FOUND, "File not found").into_response()
            }
        }
    }
}

/// Resolve a request path into a relative path, rejecting traversal and
/// absolute components.
fn sanitize(path: &str) -> Option<PathBuf> {
    let mut clean = PathBuf::new();
    for component in Path::new(path).components() {
        match component {
            Component::Normal(part) => clean.push(part),
            Component::CurDir => {}
            _ => return None,
        }
    }
    Some(clean)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> (tempfile::TempDir, StaticAssets) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<html>entry</html>").unwrap();
        std::fs::write(dir.path().join("app.js"), "console.log('hi');").unwrap();
        let assets = StaticAssets::new(dir.path().to_path_buf());
        (dir, assets)
    }

    async fn body_of(resp: Response) -> String {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn sanitize_rejects_traversal() {
        assert!(sanitize("../etc/passwd").is_none());
        assert!(sanitize("a/../../b").is_none());
        assert_eq!(sanitize("./app.js"), Some(PathBuf::from("app.js")));
        assert_eq!(
            sanitize("assets/app.js"),
            Some(PathBuf::from("assets/app.js"))
        );
    }

    #[tokio::test]
    async fn serves_existing_asset_with_content_type() {
        let (_dir, assets) = fixture();

        let resp = assets.serve("/app.js").await;
        assert_eq!(resp.status(), StatusCode::OK);
        let content_type = resp
            .headers()
            .get(header::CONTENT_TYPE)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(content_type.contains("javascript"));
        assert_eq!(body_of(resp).await, "console.log('hi');");
    }

    #[tokio::test]
    async fn unknown_path_falls_back_to_entry_file() {
        let (_dir, assets) = fixture();

        let resp = assets.serve("/some/spa/route").await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_of(resp).await, "<html>entry</html>");
    }

    #[tokio::test]
    async fn missing_entry_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let assets = StaticAssets::new(dir.path().to_path_buf());

        let resp = assets.index().await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
