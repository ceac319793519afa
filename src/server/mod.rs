//! HTTP server for the content API and the front-end bundle

mod api;
mod error;

pub use error::ApiError;

use anyhow::Result;
use axum::{routing::get, routing::post, Router};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::auth::Authenticator;
use crate::store::ContentStore;
use crate::Greetings;

/// Shared handler state
pub struct AppState {
    pub store: ContentStore,
    pub auth: Authenticator,
}

impl AppState {
    pub fn new(store: ContentStore, auth: Authenticator) -> Self {
        Self { store, auth }
    }
}

/// Build the application router.
///
/// API routes are served both at the root and under `/api`; anything else
/// is looked up in `public_dir`.
pub fn router(state: Arc<AppState>, public_dir: &Path) -> Router {
    let api = Router::new()
        .route(
            "/content",
            get(api::list_content)
                .post(api::create_content)
                .put(api::update_content)
                .delete(api::delete_content),
        )
        .route("/auth", post(api::authenticate));

    Router::new()
        .merge(api.clone())
        .nest("/api", api)
        .fallback_service(ServeDir::new(public_dir).append_index_html_on_directories(true))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the server
pub async fn start(app: &Greetings, ip: &str, port: u16, force_memory: bool) -> Result<()> {
    let store = app.open_store(force_memory)?;
    tracing::info!("Content store ready ({})", store.backend());

    if app.config.admin.is_default() {
        tracing::warn!("Admin login uses the built-in credentials; set admin.username/admin.password or ADMIN_USERNAME/ADMIN_PASSWORD");
    }

    let state = Arc::new(AppState::new(
        store,
        Authenticator::new(app.config.admin.clone()),
    ));
    let router = router(state, &app.public_dir);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AdminConfig;
    use crate::content::{seed, Audience, ContentItem};
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tempfile::TempDir;
    use tower::ServiceExt;

    struct TestApp {
        router: Router,
        state: Arc<AppState>,
        _public: TempDir,
    }

    fn test_app() -> TestApp {
        let store = ContentStore::open_in_memory().unwrap();
        store.initialize().unwrap();
        let state = Arc::new(AppState::new(
            store,
            Authenticator::new(AdminConfig {
                username: "keeper".to_string(),
                password: "s3cret#".to_string(),
            }),
        ));
        let public = TempDir::new().unwrap();
        std::fs::write(public.path().join("index.html"), "<h1>Happy New Year</h1>").unwrap();
        TestApp {
            router: router(state.clone(), public.path()),
            state,
            _public: public,
        }
    }

    async fn send(app: &TestApp, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = app.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    fn new_item(id: &str, category: Value, enabled: bool) -> Value {
        json!({
            "id": id,
            "type": "quote",
            "title": format!("Item {}", id),
            "content": "Dear {name1}",
            "category": category,
            "tags": ["test"],
            "enabled": enabled,
            "createdAt": "2025-12-31T18:30:00.000Z",
        })
    }

    #[tokio::test]
    async fn test_list_all() {
        let app = test_app();
        let (status, body) = send(&app, "GET", "/content", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), seed::default_content().len());
    }

    #[tokio::test]
    async fn test_list_by_audience() {
        let app = test_app();
        send(&app, "POST", "/content", Some(new_item("off", json!(["couple"]), false))).await;
        send(&app, "POST", "/content", Some(new_item("all", json!([]), true))).await;

        let (status, body) = send(&app, "GET", "/api/content?type=couple", None).await;
        assert_eq!(status, StatusCode::OK);
        let items: Vec<ContentItem> = serde_json::from_value(body).unwrap();
        assert!(!items.is_empty());
        assert!(items.iter().all(|i| i.enabled));
        assert!(items
            .iter()
            .all(|i| i.category.is_empty() || i.category.contains(&Audience::Couple)));
        assert!(items.iter().any(|i| i.id == "all"));
        assert!(!items.iter().any(|i| i.id == "off"));
    }

    #[tokio::test]
    async fn test_list_unknown_audience() {
        let app = test_app();
        let (status, body) = send(&app, "GET", "/content?type=family", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_create_and_conflict() {
        let app = test_app();
        let (status, body) =
            send(&app, "POST", "/content", Some(new_item("fresh", json!(["friends"]), true))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["content"]["id"], "fresh");
        assert!(app.state.store.get_by_id("fresh").unwrap().is_some());

        let (status, _) =
            send(&app, "POST", "/content", Some(new_item("fresh", json!([]), true))).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_create_assigns_id() {
        let app = test_app();
        let body = json!({"type": "comedy", "title": "Joke", "content": "Ha"});
        let (status, body) = send(&app, "POST", "/content", Some(body)).await;
        assert_eq!(status, StatusCode::OK);
        let id = body["content"]["id"].as_str().unwrap();
        assert!(!id.is_empty());
        assert_eq!(body["content"]["enabled"], true);
    }

    #[tokio::test]
    async fn test_create_rejects_bad_body() {
        let app = test_app();
        let (status, body) =
            send(&app, "POST", "/content", Some(json!({"title": "No type"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_update() {
        let app = test_app();
        send(&app, "POST", "/content", Some(new_item("edit", json!([]), true))).await;

        let (status, body) = send(
            &app,
            "PUT",
            "/content",
            Some(json!({"id": "edit", "title": "X", "createdAt": "2000-01-01T00:00:00Z"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["content"]["title"], "X");
        assert_eq!(body["content"]["content"], "Dear {name1}");

        let stored = app.state.store.get_by_id("edit").unwrap().unwrap();
        assert_eq!(stored.title, "X");
        assert_eq!(stored.created_at.to_rfc3339(), "2025-12-31T18:30:00+00:00");
    }

    #[tokio::test]
    async fn test_update_errors() {
        let app = test_app();
        let (status, _) =
            send(&app, "PUT", "/content", Some(json!({"id": "ghost", "title": "X"}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(&app, "PUT", "/content", Some(json!({"title": "X"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "ID is required");
    }

    #[tokio::test]
    async fn test_delete() {
        let app = test_app();
        send(&app, "POST", "/content", Some(new_item("bye", json!([]), true))).await;

        let (status, body) = send(&app, "DELETE", "/content?id=bye", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"success": true}));

        let (status, _) = send(&app, "DELETE", "/content?id=bye", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(&app, "DELETE", "/content", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "ID is required");
    }

    #[tokio::test]
    async fn test_auth() {
        let app = test_app();
        let (status, body) = send(
            &app,
            "POST",
            "/auth",
            Some(json!({"username": "keeper", "password": "s3cret#"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["authenticated"], true);

        let (status, wrong_user) = send(
            &app,
            "POST",
            "/api/auth",
            Some(json!({"username": "nobody", "password": "s3cret#"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, wrong_pass) = send(
            &app,
            "POST",
            "/api/auth",
            Some(json!({"username": "keeper", "password": "nope"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(wrong_user, wrong_pass);
        assert_eq!(wrong_user["authenticated"], false);

        let (status, _) = send(&app, "POST", "/auth", Some(json!({}))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_auth_non_string_credentials() {
        let app = test_app();
        let (_, wrong_pass) = send(
            &app,
            "POST",
            "/auth",
            Some(json!({"username": "keeper", "password": "nope"})),
        )
        .await;

        for body in [
            json!({"username": 123, "password": "s3cret#"}),
            json!({"username": null, "password": "s3cret#"}),
            json!({"username": "keeper", "password": false}),
        ] {
            let (status, rejected) = send(&app, "POST", "/auth", Some(body)).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert_eq!(rejected, wrong_pass);
        }
        assert_eq!(
            wrong_pass,
            json!({"success": false, "authenticated": false, "error": "Invalid credentials"})
        );
    }

    #[tokio::test]
    async fn test_update_null_media_clears() {
        let app = test_app();
        let mut item = new_item("media", json!([]), true);
        item["imageUrl"] = json!("https://x/y.png");
        item["videoUrl"] = json!("https://x/y.mp4");
        send(&app, "POST", "/content", Some(item)).await;

        let (status, body) = send(
            &app,
            "PUT",
            "/content",
            Some(json!({"id": "media", "imageUrl": null})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["content"].get("imageUrl").is_none());
        assert_eq!(body["content"]["videoUrl"], "https://x/y.mp4");

        let stored = app.state.store.get_by_id("media").unwrap().unwrap();
        assert_eq!(stored.image_url, None);
        assert_eq!(stored.video_url.as_deref(), Some("https://x/y.mp4"));
    }

    #[tokio::test]
    async fn test_static_fallback() {
        let app = test_app();
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        let response = app.router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"<h1>Happy New Year</h1>");

        let (status, _) = send(&app, "GET", "/missing.js", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
