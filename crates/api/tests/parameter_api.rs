//! HTTP-level tests for the standalone parameter and parameter type endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_component, create_port, delete, get, post_json, put_json, Form};
use sqlx::PgPool;

use archgraph_db::repositories::VersionRepo;

// ---------------------------------------------------------------------------
// Parameter types
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn parameter_type_crud(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/parameter-types",
        serde_json::json!({"name": "Port number", "generic": true}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["data"]["name"], "Port number");
    assert_eq!(created["data"]["generic"], true);
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let response = put_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/parameter-types/{id}"),
        serde_json::json!({"description": "TCP or UDP port"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["data"]["name"], "Port number");
    assert_eq!(updated["data"]["description"], "TCP or UDP port");

    let list = body_json(get(common::build_test_app(pool.clone()), "/api/v1/parameter-types").await).await;
    assert_eq!(list["data"].as_array().unwrap().len(), 1);

    let response = delete(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/parameter-types/{id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(
        common::build_test_app(pool),
        &format!("/api/v1/parameter-types/{id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn parameter_type_requires_name(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/parameter-types",
        serde_json::json!({"name": ""}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Parameters
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_parameter_for_port(pool: PgPool) {
    let type_id = common::create_parameter_type(&pool, "Protocol").await;
    let core = create_component(&pool, "Core").await;
    let port = create_port(&pool, &core, "P1").await;

    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/parameters",
        serde_json::json!({
            "name": "proto",
            "value": "tcp",
            "parameter_type": type_id,
            "owner": {"kind": "port", "id": port},
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "proto");
    assert_eq!(json["data"]["element_type"], "port");
    assert_eq!(json["data"]["element_detail"]["name"], "P1");
    assert_eq!(json["data"]["parameter_type"], "Protocol");
    let id = json["data"]["id"].as_str().unwrap().to_string();

    let diagram = body_json(
        get(common::build_test_app(pool.clone()), &format!("/api/v1/ports/{port}/diagram")).await,
    )
    .await;
    assert_eq!(diagram["parameters"][0]["id"], id.as_str());

    let complete = body_json(get(common::build_test_app(pool), "/api/v1/parameters/complete").await).await;
    assert_eq!(complete["data"][0]["parent_info"], "Component: Core");
    assert_eq!(complete["data"][0]["parent_component"]["name"], "Core");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn parameter_with_unknown_type_is_rejected(pool: PgPool) {
    let core = create_component(&pool, "Core").await;
    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/parameters",
        serde_json::json!({
            "value": "x",
            "parameter_type": uuid::Uuid::now_v7(),
            "owner": {"kind": "component", "id": core},
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_owner_error_hides_constraint_name(pool: PgPool) {
    let type_id = common::create_parameter_type(&pool, "Generic").await;
    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/parameters",
        serde_json::json!({
            "name": "orphan",
            "parameter_type": type_id,
            "owner": {"kind": "port", "id": uuid::Uuid::now_v7()},
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    let message = json["error"].as_str().unwrap();
    assert!(!message.contains("parameters_"), "leaked: {message}");
    assert!(!message.contains("fkey"), "leaked: {message}");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn parameter_with_unknown_owner_kind_is_rejected(pool: PgPool) {
    let type_id = common::create_parameter_type(&pool, "Generic").await;
    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/parameters",
        serde_json::json!({
            "parameter_type": type_id,
            "owner": {"kind": "diagram", "id": uuid::Uuid::now_v7()},
        }),
    )
    .await;
    assert!(response.status().is_client_error());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn parameter_can_move_to_another_owner(pool: PgPool) {
    let type_id = common::create_parameter_type(&pool, "Generic").await;
    let core = create_component(&pool, "Core").await;
    let port = create_port(&pool, &core, "P1").await;

    let created = body_json(
        post_json(
            common::build_test_app(pool.clone()),
            "/api/v1/parameters",
            serde_json::json!({
                "name": "moved",
                "parameter_type": type_id,
                "owner": {"kind": "component", "id": core},
            }),
        )
        .await,
    )
    .await;
    let id = created["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(created["data"]["element_type"], "component");

    let response = put_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/parameters/{id}"),
        serde_json::json!({
            "name": "moved",
            "parameter_type": type_id,
            "owner": {"kind": "port", "id": port},
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["element_type"], "port");

    let component = body_json(
        get(common::build_test_app(pool), &format!("/api/v1/components/{core}/diagram")).await,
    )
    .await;
    assert_eq!(component["parameters"], serde_json::json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_parameter(pool: PgPool) {
    let type_id = common::create_parameter_type(&pool, "Generic").await;
    let core = create_component(&pool, "Core").await;
    let created = body_json(
        post_json(
            common::build_test_app(pool.clone()),
            "/api/v1/parameters",
            serde_json::json!({
                "parameter_type": type_id,
                "owner": {"kind": "component", "id": core},
            }),
        )
        .await,
    )
    .await;
    assert_eq!(created["data"]["name"], "Default parameter");
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let uri = format!("/api/v1/parameters/{id}");
    let response = delete(common::build_test_app(pool.clone()), &uri).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = delete(common::build_test_app(pool), &uri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn listing_filters_by_owner_version(pool: PgPool) {
    let type_id = common::create_parameter_type(&pool, "Generic").await;
    let v1 = VersionRepo::create(&pool, "v1", None).await.unwrap();
    let v2 = VersionRepo::create(&pool, "v2", None).await.unwrap();
    let parameters =
        |name: &str| serde_json::json!([{"name": name, "parameter_type": type_id}]).to_string();

    let in_v1 = common::create_element(
        &pool,
        "components",
        Form::new()
            .field("name", "Old")
            .field("version", v1.id.to_string())
            .field("parameters", parameters("old")),
    )
    .await;
    common::create_element(
        &pool,
        "components",
        Form::new()
            .field("name", "New")
            .field("version", v2.id.to_string())
            .field("parameters", parameters("new")),
    )
    .await;
    // Ports inherit the version of their component.
    let port = common::create_element(
        &pool,
        "ports",
        Form::new()
            .field("name", "P1")
            .field("component", in_v1["id"].as_str().unwrap())
            .field("parameters", parameters("port")),
    )
    .await;
    assert_eq!(port["version"], v1.id.to_string());

    let json = body_json(
        get(
            common::build_test_app(pool.clone()),
            &format!("/api/v1/parameters?version={}", v1.id),
        )
        .await,
    )
    .await;
    let mut names: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    names.sort_unstable();
    assert_eq!(names, vec!["old", "port"]);

    let all = body_json(get(common::build_test_app(pool), "/api/v1/parameters").await).await;
    assert_eq!(all["data"].as_array().unwrap().len(), 3);
}
