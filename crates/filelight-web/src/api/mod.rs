mod auth_handlers;
pub mod descriptions;
pub mod files;
pub mod raw;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

/// Routes that are rate limited per client IP.
pub fn auth_router() -> Router<AppState> {
    Router::new().route("/auth/login", post(auth_handlers::login))
}

pub fn browse_router() -> Router<AppState> {
    Router::new()
        .route("/files", get(files::list_files))
        .route("/raw", get(raw::download))
        .route("/descriptions", post(descriptions::update_description))
        .route("/auth/logout", post(auth_handlers::logout))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use filelight_core::Settings;
    use tempfile::TempDir;
    use tower::ServiceExt;

    use super::*;
    use crate::auth::password;
    use crate::config::ServerConfig;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn setup(admin_password: &str) -> (TempDir, Router) {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("docs")).unwrap();
        fs::write(tmp.path().join("docs/readme.txt"), "hello").unwrap();
        fs::write(tmp.path().join("a.txt"), "a").unwrap();

        let mut config = ServerConfig {
            browse: Settings {
                root: tmp.path().to_path_buf(),
                ..Settings::default()
            },
            ..ServerConfig::default()
        };
        config.auth.jwt_secret = SECRET.to_string();
        if !admin_password.is_empty() {
            config.auth.admin_password = password::hash_password(admin_password).unwrap();
        }
        let state = AppState::new(config).unwrap();
        let app = Router::new()
            .nest("/api", auth_router().merge(browse_router()))
            .with_state(state);
        (tmp, app)
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, value)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, token: Option<&str>, body: serde_json::Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn login(app: &Router, password: &str) -> (StatusCode, serde_json::Value) {
        send(
            app,
            post_json("/api/auth/login", None, serde_json::json!({ "password": password })),
        )
        .await
    }

    #[tokio::test]
    async fn lists_root() {
        let (_tmp, app) = setup("");

        let (status, body) = send(&app, get("/api/files")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["current_dir"], "");
        let names: Vec<&str> = body["entries"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["docs", "a.txt"]);
    }

    #[tokio::test]
    async fn escaping_dir_is_forbidden() {
        let (_tmp, app) = setup("");

        let (status, body) = send(&app, get("/api/files?dir=..%2F..")).await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], "Forbidden");
    }

    #[tokio::test]
    async fn raw_streams_file_contents() {
        let (_tmp, app) = setup("");

        let response = app
            .clone()
            .oneshot(get("/api/raw?path=docs%2Freadme.txt"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE].to_str().unwrap(),
            "text/plain"
        );
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"hello");
    }

    #[tokio::test]
    async fn raw_hides_sidecar() {
        let (tmp, app) = setup("");
        fs::write(tmp.path().join("DESCRIPT.ION"), "a.txt  x\n").unwrap();

        let (status, _) = send(&app, get("/api/raw?path=DESCRIPT.ION")).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn description_requires_admin() {
        let (_tmp, app) = setup("pw");

        let (status, body) = send(
            &app,
            post_json(
                "/api/descriptions",
                None,
                serde_json::json!({ "dir": "", "filename": "a.txt", "description": "x" }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Admin access required");
    }

    #[tokio::test]
    async fn login_with_wrong_password_fails() {
        let (_tmp, app) = setup("pw");

        let (status, _) = login(&app, "nope").await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn login_fails_when_admin_disabled() {
        let (_tmp, app) = setup("");

        let (status, _) = login(&app, "").await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn admin_edits_description_then_listing_shows_it() {
        let (tmp, app) = setup("pw");
        let (status, body) = login(&app, "pw").await;
        assert_eq!(status, StatusCode::OK);
        let token = body["token"].as_str().unwrap().to_string();

        let (status, body) = send(
            &app,
            post_json(
                "/api/descriptions",
                Some(&token),
                serde_json::json!({ "dir": "docs", "filename": "readme.txt", "description": "Read me first" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({ "success": true }));
        assert!(tmp.path().join("docs/DESCRIPT.ION").exists());

        let (_, body) = send(&app, get("/api/files?dir=docs")).await;
        assert_eq!(body["entries"][0]["description"], "Read me first");
    }

    #[tokio::test]
    async fn invalid_directory_is_reported_in_body() {
        let (_tmp, app) = setup("pw");
        let (_, body) = login(&app, "pw").await;
        let token = body["token"].as_str().unwrap().to_string();

        let (status, body) = send(
            &app,
            post_json(
                "/api/descriptions",
                Some(&token),
                serde_json::json!({ "dir": "../..", "filename": "a.txt", "description": "x" }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Invalid directory");
    }

    #[tokio::test]
    async fn logout_revokes_token() {
        let (_tmp, app) = setup("pw");
        let (_, body) = login(&app, "pw").await;
        let token = body["token"].as_str().unwrap().to_string();

        let (status, _) = send(
            &app,
            post_json("/api/auth/logout", Some(&token), serde_json::json!({})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(
            &app,
            post_json(
                "/api/descriptions",
                Some(&token),
                serde_json::json!({ "filename": "a.txt", "description": "x" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
