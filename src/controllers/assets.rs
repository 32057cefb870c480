//! Static dashboard assets

use actix_web::{HttpResponse, web};
use std::path::{Component, Path, PathBuf};
use tracing::debug;

use crate::state::AppState;

pub async fn index(data: web::Data<AppState>) -> HttpResponse {
    serve(&data.public_dir, "index.html").await
}

pub async fn static_file(data: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    serve(&data.public_dir, &path.into_inner()).await
}

async fn serve(root: &Path, requested: &str) -> HttpResponse {
    let Some(file) = resolve(root, requested) else {
        debug!("Rejected asset path {}", requested);
        return HttpResponse::NotFound().finish();
    };

    let file = match tokio::fs::metadata(&file).await {
        Ok(meta) if meta.is_dir() => file.join("index.html"),
        _ => file,
    };

    match tokio::fs::read(&file).await {
        Ok(contents) => {
            let mime = mime_guess::from_path(&file).first_or_octet_stream();
            HttpResponse::Ok()
                .content_type(mime.essence_str())
                .body(contents)
        }
        Err(e) => {
            debug!("Asset {} not served: {}", file.display(), e);
            HttpResponse::NotFound().finish()
        }
    }
}

/// Join `requested` onto `root`, refusing anything that could leave it
fn resolve(root: &Path, requested: &str) -> Option<PathBuf> {
    let relative = Path::new(requested);
    if relative.as_os_str().is_empty() {
        return Some(root.join("index.html"));
    }

    if !relative
        .components()
        .all(|component| matches!(component, Component::Normal(_)))
    {
        return None;
    }

    Some(root.join(relative))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use actix_web::http::StatusCode;
    use actix_web::http::header::CONTENT_TYPE;

    #[test]
    fn test_resolve_rejects_traversal() {
        let root = Path::new("/srv/public");
        assert_eq!(resolve(root, "../secret.txt"), None);
        assert_eq!(resolve(root, "css/../../etc/passwd"), None);
        assert_eq!(resolve(root, "/etc/passwd"), None);
    }

    #[test]
    fn test_resolve_plain_paths() {
        let root = Path::new("/srv/public");
        assert_eq!(
            resolve(root, "js/app.js"),
            Some(PathBuf::from("/srv/public/js/app.js"))
        );
        assert_eq!(resolve(root, ""), Some(PathBuf::from("/srv/public/index.html")));
    }

    #[tokio::test]
    async fn test_directory_serves_its_index() {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir(root.path().join("docs")).unwrap();
        std::fs::write(root.path().join("docs/index.html"), "<h1>docs</h1>").unwrap();

        let resp = serve(root.path(), "docs").await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get(CONTENT_TYPE).unwrap().to_str().unwrap(),
            "text/html"
        );

        let body = to_bytes(resp.into_body()).await.unwrap();
        assert_eq!(&body[..], b"<h1>docs</h1>");
    }

    #[tokio::test]
    async fn test_directory_without_index_is_not_found() {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir(root.path().join("empty")).unwrap();

        let resp = serve(root.path(), "empty").await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
