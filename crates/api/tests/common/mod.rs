#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use archgraph_api::config::ServerConfig;
use archgraph_api::images::ImageStore;
use archgraph_api::router::build_app_router;
use archgraph_api::state::AppState;
use archgraph_db::collaborators::PgCollaborators;

const BOUNDARY: &str = "archgraph-test-boundary";

/// Build a test `ServerConfig` with safe defaults and a fresh image root
/// under the system temp directory.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:4200".to_string()],
        request_timeout_secs: 30,
        image_root: std::env::temp_dir().join(format!("archgraph-test-{}", uuid::Uuid::now_v7())),
        max_upload_bytes: 5 * 1024 * 1024,
    }
}

/// Build the full application router with the production middleware stack.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_root(pool, test_config().image_root)
}

/// Same as [`build_test_app`], storing images under `image_root`.
pub fn build_test_app_with_root(pool: PgPool, image_root: PathBuf) -> Router {
    let config = ServerConfig {
        image_root: image_root.clone(),
        ..test_config()
    };
    let state = AppState {
        pool: pool.clone(),
        config: Arc::new(config),
        images: Arc::new(ImageStore::new(image_root)),
        collaborators: Arc::new(PgCollaborators::new(pool)),
    };
    build_app_router(state)
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("failed to read body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body is not JSON")
}

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.expect("request failed")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

async fn json_request(app: Router, method: Method, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    json_request(app, Method::POST, uri, body).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    json_request(app, Method::PUT, uri, body).await
}

/// A multipart form body: text fields plus `files` parts.
#[derive(Default)]
pub struct Form {
    fields: Vec<(String, String)>,
    files: Vec<(String, Vec<u8>)>,
}

impl Form {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: &str, value: impl Into<String>) -> Self {
        self.fields.push((name.to_string(), value.into()));
        self
    }

    pub fn file(mut self, file_name: &str, bytes: &[u8]) -> Self {
        self.files.push((file_name.to_string(), bytes.to_vec()));
        self
    }

    fn encode(&self) -> Vec<u8> {
        let mut body = Vec::new();
        for (name, value) in &self.fields {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        for (file_name, bytes) in &self.files {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"files\"; \
                     filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(bytes);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }
}

async fn multipart_request(app: Router, method: Method, uri: &str, form: Form) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(form.encode()))
        .unwrap();
    send(app, request).await
}

pub async fn post_form(app: Router, uri: &str, form: Form) -> Response<Body> {
    multipart_request(app, Method::POST, uri, form).await
}

pub async fn put_form(app: Router, uri: &str, form: Form) -> Response<Body> {
    multipart_request(app, Method::PUT, uri, form).await
}

/// Create a parameter type through the API and return its id.
pub async fn create_parameter_type(pool: &PgPool, name: &str) -> String {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/parameter-types",
        serde_json::json!({"name": name}),
    )
    .await;
    let json = body_json(response).await;
    json["data"]["id"].as_str().unwrap().to_string()
}

/// Create an element through the API and return its JSON.
pub async fn create_element(pool: &PgPool, resource: &str, form: Form) -> serde_json::Value {
    let response = post_form(build_test_app(pool.clone()), &format!("/api/v1/{resource}"), form).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED, "creating {resource}");
    body_json(response).await
}

/// Create a component named `name` and return its id.
pub async fn create_component(pool: &PgPool, name: &str) -> String {
    let json = create_element(pool, "components", Form::new().field("name", name)).await;
    json["id"].as_str().unwrap().to_string()
}

/// Create a port under `component` and return its id.
pub async fn create_port(pool: &PgPool, component: &str, name: &str) -> String {
    let form = Form::new().field("name", name).field("component", component);
    let json = create_element(pool, "ports", form).await;
    json["id"].as_str().unwrap().to_string()
}

/// Create a sub-component under `component` and return its id.
pub async fn create_subcomponent(pool: &PgPool, component: &str, name: &str) -> String {
    let form = Form::new().field("name", name).field("component", component);
    let json = create_element(pool, "subcomponents", form).await;
    json["id"].as_str().unwrap().to_string()
}
