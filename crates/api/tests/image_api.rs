//! HTTP-level tests for element images and the local image store.

mod common;

use std::path::{Path, PathBuf};

use axum::http::StatusCode;
use common::{body_json, delete, get, post_form, put_form, Form};
use sqlx::PgPool;

const PNG: &[u8] = b"\x89PNG\r\n\x1a\nnot really a png";

fn stored_path(root: &Path, url: &str) -> PathBuf {
    root.join(url.trim_start_matches("/media/"))
}

async fn component_with_image(pool: &PgPool, root: &Path) -> serde_json::Value {
    let form = Form::new()
        .field("name", "Core")
        .field("images", r#"[{"uuid":"","default":1}]"#)
        .file("diagram.png", PNG);
    let response = post_form(
        common::build_test_app_with_root(pool.clone(), root.to_path_buf()),
        "/api/v1/components",
        form,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn upload_is_stored_and_served(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let json = component_with_image(&pool, dir.path()).await;

    let images = json["images"].as_array().unwrap();
    assert_eq!(images.len(), 1);
    assert_eq!(images[0]["default"], true);
    let url = images[0]["file"].as_str().unwrap();
    assert!(url.starts_with("/media/images/component/"));
    assert!(url.ends_with(".png"));
    assert_eq!(std::fs::read(stored_path(dir.path(), url)).unwrap(), PNG);

    let response = get(
        common::build_test_app_with_root(pool, dir.path().to_path_buf()),
        url,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unsupported_extension_is_rejected(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let form = Form::new()
        .field("name", "Core")
        .field("images", r#"[{"uuid":"","default":0}]"#)
        .file("notes.txt", b"hello");
    let response = post_form(
        common::build_test_app_with_root(pool.clone(), dir.path().to_path_buf()),
        "/api/v1/components",
        form,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let list = body_json(get(common::build_test_app(pool), "/api/v1/components").await).await;
    assert_eq!(list, serde_json::json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_keeps_listed_images(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let created = component_with_image(&pool, dir.path()).await;
    let id = created["id"].as_str().unwrap();
    let image = created["images"][0]["uuid"].as_str().unwrap();

    let manifest = serde_json::json!([{"uuid": image, "default": false}]);
    let form = Form::new()
        .field("name", "Core")
        .field("images", manifest.to_string());
    let response = put_form(
        common::build_test_app_with_root(pool, dir.path().to_path_buf()),
        &format!("/api/v1/components/{id}"),
        form,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["images"].as_array().unwrap().len(), 1);
    assert_eq!(json["images"][0]["uuid"], image);
    assert_eq!(json["images"][0]["default"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_without_manifest_leaves_images(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let created = component_with_image(&pool, dir.path()).await;
    let id = created["id"].as_str().unwrap();

    let response = put_form(
        common::build_test_app_with_root(pool, dir.path().to_path_buf()),
        &format!("/api/v1/components/{id}"),
        Form::new().field("name", "Renamed"),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["name"], "Renamed");
    assert_eq!(json["images"], created["images"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_removes_unlisted_images_and_files(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let created = component_with_image(&pool, dir.path()).await;
    let id = created["id"].as_str().unwrap();
    let old_file = stored_path(dir.path(), created["images"][0]["file"].as_str().unwrap());

    let form = Form::new()
        .field("name", "Core")
        .field("images", r#"[{"uuid":"","default":true}]"#)
        .file("replacement.jpg", b"jpeg bytes");
    let response = put_form(
        common::build_test_app_with_root(pool, dir.path().to_path_buf()),
        &format!("/api/v1/components/{id}"),
        form,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let images = json["images"].as_array().unwrap();
    assert_eq!(images.len(), 1);
    assert_ne!(images[0]["uuid"], created["images"][0]["uuid"]);
    assert!(images[0]["file"].as_str().unwrap().ends_with(".jpg"));
    assert!(!old_file.exists());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn keeping_foreign_image_returns_404(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let created = component_with_image(&pool, dir.path()).await;
    let id = created["id"].as_str().unwrap();

    let manifest = serde_json::json!([{"uuid": uuid::Uuid::now_v7(), "default": false}]);
    let form = Form::new()
        .field("name", "Core")
        .field("images", manifest.to_string());
    let response = put_form(
        common::build_test_app_with_root(pool, dir.path().to_path_buf()),
        &format!("/api/v1/components/{id}"),
        form,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_removes_files_of_whole_subtree(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let created = component_with_image(&pool, dir.path()).await;
    let component = created["id"].as_str().unwrap();
    let component_file = stored_path(dir.path(), created["images"][0]["file"].as_str().unwrap());

    let form = Form::new()
        .field("name", "P1")
        .field("component", component)
        .field("images", r#"[{"uuid":"","default":0}]"#)
        .file("port.svg", b"<svg/>");
    let port = body_json(
        post_form(
            common::build_test_app_with_root(pool.clone(), dir.path().to_path_buf()),
            "/api/v1/ports",
            form,
        )
        .await,
    )
    .await;
    let port_file = stored_path(dir.path(), port["images"][0]["file"].as_str().unwrap());
    assert!(port_file.exists());

    let response = delete(
        common::build_test_app_with_root(pool, dir.path().to_path_buf()),
        &format!("/api/v1/components/{component}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(!component_file.exists());
    assert!(!port_file.exists());
}
