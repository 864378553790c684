#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tinywiki::{build_router, AppState, PageStore, QuoteStore, TemplateComponent};
use tower::ServiceExt;

pub struct TestHarness {
    pub pages_dir: TempDir,
    pub state: AppState,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn location(&self) -> Option<&str> {
        self.headers.get(header::LOCATION).and_then(|v| v.to_str().ok())
    }
}

impl TestHarness {
    /// Fresh pages directory, the shipped templates, and an in-memory quote store
    pub fn new() -> Self {
        Self::with_templates(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("templates"))
    }

    pub fn with_templates(templates_dir: PathBuf) -> Self {
        let pages_dir = tempfile::tempdir().expect("create pages dir");
        let state = AppState {
            pages: Arc::new(PageStore::open(pages_dir.path()).expect("open page store")),
            templates: Arc::new(TemplateComponent::new(templates_dir)),
            quotes: Arc::new(QuoteStore::open_in_memory().expect("open quote store")),
        };
        Self { pages_dir, state }
    }

    pub fn app(&self) -> Router {
        build_router(self.state.clone())
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let resp = self.app().oneshot(request).await.expect("router is infallible");
        let status = resp.status();
        let headers = resp.headers().clone();
        let bytes = resp.into_body().collect().await.expect("read body").to_bytes();
        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri).await
    }

    pub async fn request(&self, method: Method, uri: &str) -> TestResponse {
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .expect("build request");
        self.send(req).await
    }

    /// POST an urlencoded form, as the edit page does
    pub async fn post_form(&self, uri: &str, form: &str) -> TestResponse {
        self.post_raw(uri, Some("application/x-www-form-urlencoded"), form.as_bytes().to_vec())
            .await
    }

    pub async fn post_raw(&self, uri: &str, content_type: Option<&str>, body: Vec<u8>) -> TestResponse {
        let mut builder = Request::builder().method(Method::POST).uri(uri);
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        let req = builder.body(Body::from(body)).expect("build request");
        self.send(req).await
    }

    pub fn stored_body(&self, title: &str) -> Vec<u8> {
        let title = tinywiki::Title::parse(title).expect("valid title");
        self.state.pages.load(&title).expect("page saved").body
    }
}
