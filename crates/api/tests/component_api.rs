//! HTTP-level tests for components, sub-components and ports.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_component, create_port, delete, get, post_form, put_form, Form};
use archgraph_core::owner::OwnerRef;
use archgraph_db::repositories::{CollaboratorRepo, CollaboratorTable, VersionRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_component_returns_diagram_view(pool: PgPool) {
    let type_id = common::create_parameter_type(&pool, "Timeout").await;
    let parameters = serde_json::json!([
        {"name": "timeout", "value": "30", "secret": false, "parameter_type": type_id}
    ]);
    let form = Form::new()
        .field("name", "Core")
        .field("availability", "true")
        .field("parameters", parameters.to_string());

    let response = post_form(common::build_test_app(pool), "/api/v1/components", form).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["name"], "Core");
    assert_eq!(json["availability"], true);
    assert_eq!(json["confidentiality"], false);
    assert!(json["id"].is_string());
    assert_eq!(json["parameters"].as_array().unwrap().len(), 1);
    assert_eq!(json["parameters"][0]["name"], "timeout");
    assert_eq!(json["parameters"][0]["value"], "30");
    assert_eq!(json["parameters"][0]["parameter_type"], type_id.as_str());
    assert_eq!(json["images"], serde_json::json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_component_without_name_is_rejected(pool: PgPool) {
    let form = Form::new().field("description", "nameless");
    let response = post_form(common::build_test_app(pool.clone()), "/api/v1/components", form).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");

    let list = body_json(get(common::build_test_app(pool), "/api/v1/components").await).await;
    assert_eq!(list, serde_json::json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn malformed_parameters_reject_the_request(pool: PgPool) {
    let form = Form::new()
        .field("name", "Core")
        .field("parameters", "[{not json");
    let response = post_form(common::build_test_app(pool), "/api/v1/components", form).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_parameter_type_is_skipped(pool: PgPool) {
    let known = common::create_parameter_type(&pool, "Known").await;
    let unknown = uuid::Uuid::now_v7();
    let parameters = serde_json::json!([
        {"name": "kept", "value": "1", "parameter_type": known},
        {"name": "dropped", "value": "2", "parameter_type": unknown},
    ]);
    let form = Form::new()
        .field("name", "Core")
        .field("parameters", parameters.to_string());

    let response = post_form(common::build_test_app(pool), "/api/v1/components", form).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    let names: Vec<&str> = json["parameters"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["kept"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn overlong_parameter_name_is_skipped(pool: PgPool) {
    let type_id = common::create_parameter_type(&pool, "Generic").await;
    let parameters = serde_json::json!([
        {"name": "x".repeat(300), "value": "1", "parameter_type": type_id},
        {"name": "ok", "value": "2", "parameter_type": type_id},
    ]);
    let form = Form::new()
        .field("name", "Core")
        .field("parameters", parameters.to_string());

    let response = post_form(common::build_test_app(pool.clone()), "/api/v1/components", form).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    let names: Vec<&str> = json["parameters"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["ok"]);

    let list = body_json(get(common::build_test_app(pool), "/api/v1/components").await).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_replaces_parameter_set(pool: PgPool) {
    let type_id = common::create_parameter_type(&pool, "Generic").await;
    let initial = serde_json::json!([
        {"name": "A", "value": "a", "parameter_type": type_id},
        {"name": "B", "value": "b", "parameter_type": type_id},
    ]);
    let created = common::create_element(
        &pool,
        "components",
        Form::new().field("name", "Core").field("parameters", initial.to_string()),
    )
    .await;
    let id = created["id"].as_str().unwrap();
    assert_eq!(created["parameters"].as_array().unwrap().len(), 2);

    let replacement = serde_json::json!([{"name": "C", "value": "c", "parameter_type": type_id}]);
    let form = Form::new()
        .field("name", "Core")
        .field("parameters", replacement.to_string());
    let response = put_form(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/components/{id}"),
        form,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let parameters = json["parameters"].as_array().unwrap();
    assert_eq!(parameters.len(), 1);
    assert_eq!(parameters[0]["name"], "C");

    let all = body_json(get(common::build_test_app(pool), "/api/v1/parameters").await).await;
    assert_eq!(all["data"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_keeps_parameter_ids_sent_back(pool: PgPool) {
    let type_id = common::create_parameter_type(&pool, "Generic").await;
    let initial = serde_json::json!([{"name": "A", "value": "1", "parameter_type": type_id}]);
    let created = common::create_element(
        &pool,
        "components",
        Form::new().field("name", "Core").field("parameters", initial.to_string()),
    )
    .await;
    let id = created["id"].as_str().unwrap();
    let parameter_id = created["parameters"][0]["id"].as_str().unwrap();

    let edited = serde_json::json!([
        {"id": parameter_id, "name": "A", "value": "2", "parameter_type": type_id}
    ]);
    let form = Form::new().field("name", "Core").field("parameters", edited.to_string());
    let json = body_json(
        put_form(common::build_test_app(pool), &format!("/api/v1/components/{id}"), form).await,
    )
    .await;

    assert_eq!(json["parameters"][0]["id"], parameter_id);
    assert_eq!(json["parameters"][0]["value"], "2");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn only_notes_leaves_everything_else(pool: PgPool) {
    let type_id = common::create_parameter_type(&pool, "Generic").await;
    let initial = serde_json::json!([{"name": "A", "value": "1", "parameter_type": type_id}]);
    let created = common::create_element(
        &pool,
        "components",
        Form::new()
            .field("name", "Core")
            .field("description", "original")
            .field("parameters", initial.to_string()),
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let form = Form::new()
        .field("onlyNotes", "1")
        .field("notes", "reviewed")
        .field("name", "Ignored");
    let response = put_form(
        common::build_test_app(pool),
        &format!("/api/v1/components/{id}"),
        form,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["notes"], "reviewed");
    assert_eq!(json["name"], "Core");
    assert_eq!(json["description"], "original");
    assert_eq!(json["parameters"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn child_update_keeps_parent_and_replaces_parameters(pool: PgPool) {
    let type_id = common::create_parameter_type(&pool, "Generic").await;
    let component = create_component(&pool, "Core").await;

    for resource in ["ports", "subcomponents"] {
        let initial = serde_json::json!([{"name": "old", "parameter_type": type_id}]);
        let created = common::create_element(
            &pool,
            resource,
            Form::new()
                .field("name", "Child")
                .field("component", component.as_str())
                .field("parameters", initial.to_string()),
        )
        .await;
        let id = created["id"].as_str().unwrap();

        let replacement = serde_json::json!([{"name": "new", "parameter_type": type_id}]);
        let form = Form::new()
            .field("name", "Renamed")
            .field("parameters", replacement.to_string());
        let response = put_form(
            common::build_test_app(pool.clone()),
            &format!("/api/v1/{resource}/{id}"),
            form,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK, "updating {resource}");

        let json = body_json(response).await;
        assert_eq!(json["name"], "Renamed");
        assert_eq!(json["component"], component.as_str());
        assert_eq!(json["parameters"].as_array().unwrap().len(), 1);
        assert_eq!(json["parameters"][0]["name"], "new");

        let notes = put_form(
            common::build_test_app(pool.clone()),
            &format!("/api/v1/{resource}/{id}"),
            Form::new().field("only_notes", "1").field("notes", "checked"),
        )
        .await;
        let json = body_json(notes).await;
        assert_eq!(json["notes"], "checked");
        assert_eq!(json["name"], "Renamed");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_missing_component_returns_404(pool: PgPool) {
    let id = uuid::Uuid::now_v7();
    let response = put_form(
        common::build_test_app(pool),
        &format!("/api/v1/components/{id}"),
        Form::new().field("name", "Ghost"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Children and detail
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn port_requires_existing_component(pool: PgPool) {
    let form = Form::new()
        .field("name", "P1")
        .field("component", uuid::Uuid::now_v7().to_string());
    let response = post_form(common::build_test_app(pool), "/api/v1/ports", form).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn component_detail_lists_children(pool: PgPool) {
    let component = create_component(&pool, "Core").await;
    let port = create_port(&pool, &component, "P1").await;
    let subcomponent = common::create_subcomponent(&pool, &component, "Engine").await;

    let response = get(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/components/{component}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["name"], "Core");
    assert_eq!(json["ports"][0]["id"], port.as_str());
    assert_eq!(json["subcomponents"][0]["id"], subcomponent.as_str());
    assert_eq!(json["vulnerabilities"], serde_json::json!([]));
    assert_eq!(json["flow_executions"], serde_json::json!([]));

    let port_detail = body_json(
        get(common::build_test_app(pool), &format!("/api/v1/ports/{port}")).await,
    )
    .await;
    assert_eq!(port_detail["name"], "P1");
    assert_eq!(port_detail["component"]["id"], component.as_str());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn detail_passes_collaborator_records_through(pool: PgPool) {
    let sut = serde_json::json!({"host": "10.0.0.1", "services": ["ssh", "http"]});
    let version = VersionRepo::create(&pool, "v1", Some(&sut)).await.unwrap();
    let created = common::create_element(
        &pool,
        "components",
        Form::new()
            .field("name", "Core")
            .field("version", version.id.to_string()),
    )
    .await;
    let id: uuid::Uuid = created["id"].as_str().unwrap().parse().unwrap();
    let owner = OwnerRef::Component(id);

    let finding = serde_json::json!({"cve": "CVE-2024-0001", "score": 9.8});
    let run = serde_json::json!({"flow": "login", "steps": [1, 2, 3], "passed": true});
    CollaboratorRepo::record(&pool, CollaboratorTable::Vulnerabilities, owner, &finding)
        .await
        .unwrap();
    CollaboratorRepo::record(&pool, CollaboratorTable::FlowExecutions, owner, &run)
        .await
        .unwrap();

    let response = get(common::build_test_app(pool), &format!("/api/v1/components/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["version"]["name"], "v1");
    assert_eq!(json["sut"], sut);
    assert_eq!(json["vulnerabilities"].as_array().unwrap().len(), 1);
    assert_eq!(json["vulnerabilities"][0]["payload"], finding);
    assert_eq!(json["flow_executions"].as_array().unwrap().len(), 1);
    assert_eq!(json["flow_executions"][0]["payload"], run);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn diagram_view_is_stable_between_reads(pool: PgPool) {
    let type_id = common::create_parameter_type(&pool, "Generic").await;
    let parameters = serde_json::json!([
        {"name": "A", "value": "1", "parameter_type": type_id},
        {"name": "B", "value": "2", "secret": true, "parameter_type": type_id},
    ]);
    let created = common::create_element(
        &pool,
        "components",
        Form::new()
            .field("name", "Core")
            .field("parameters", parameters.to_string())
            .field("images", r#"[{"uuid":"","default":1}]"#)
            .file("front.png", b"png"),
    )
    .await;
    let id = created["id"].as_str().unwrap();
    let uri = format!("/api/v1/components/{id}/diagram");

    let first = body_json(get(common::build_test_app(pool.clone()), &uri).await).await;
    let second = body_json(get(common::build_test_app(pool), &uri).await).await;

    assert_eq!(first["parameters"].as_array().unwrap().len(), 2);
    assert_eq!(first, second);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn diagram_view_of_subcomponent_references_parent(pool: PgPool) {
    let component = create_component(&pool, "Core").await;
    let subcomponent = common::create_subcomponent(&pool, &component, "Engine").await;

    let json = body_json(
        get(
            common::build_test_app(pool),
            &format!("/api/v1/subcomponents/{subcomponent}/diagram"),
        )
        .await,
    )
    .await;
    assert_eq!(json["component"], component.as_str());
    assert_eq!(json["parameters"], serde_json::json!([]));
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_component_cascades(pool: PgPool) {
    let type_id = common::create_parameter_type(&pool, "Generic").await;
    let component = create_component(&pool, "Core").await;
    let p1 = create_port(&pool, &component, "P1").await;
    let parameters = serde_json::json!([{"name": "x", "value": "1", "parameter_type": type_id}]);
    common::create_element(
        &pool,
        "interfaces",
        Form::new()
            .field("name", "link")
            .field("port_from", p1.as_str())
            .field("parameters", parameters.to_string()),
    )
    .await;

    let response = delete(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/components/{component}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    for resource in ["components", "ports", "interfaces"] {
        let json = body_json(
            get(common::build_test_app(pool.clone()), &format!("/api/v1/{resource}")).await,
        )
        .await;
        assert_eq!(json, serde_json::json!([]), "{resource} should be empty");
    }
    let parameters = body_json(get(common::build_test_app(pool), "/api/v1/parameters").await).await;
    assert_eq!(parameters["data"], serde_json::json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_missing_component_returns_404(pool: PgPool) {
    let id = uuid::Uuid::now_v7();
    let response = delete(common::build_test_app(pool), &format!("/api/v1/components/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
