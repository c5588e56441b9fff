//! Handlers for the `/ports` resource.

use archgraph_core::types::DbId;
use archgraph_db::models::port::{Port, PortInput};
use archgraph_db::projections::{DiagramView, PortDetail};
use archgraph_db::repositories::PortRepo;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::error::AppResult;
use crate::forms::ElementForm;
use crate::handlers::element_write::{
    create_element, delete_element, element_diagram, find_element, parent_component,
    update_element, update_element_notes,
};
use crate::state::AppState;

/// GET /api/v1/ports
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Port>>> {
    let ports = PortRepo::list(&state.pool).await?;
    Ok(Json(ports))
}

/// GET /api/v1/ports/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<PortDetail>> {
    let port = find_element::<Port>(&state, id).await?;
    let detail = PortDetail::load(&state.pool, state.collaborators.as_ref(), &port).await?;
    Ok(Json(detail))
}

/// GET /api/v1/ports/{id}/diagram
pub async fn get_diagram(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DiagramView<Port>>> {
    Ok(Json(element_diagram(&state, id).await?))
}

/// The version is inherited from the parent component.
async fn port_input(
    state: &AppState,
    form: &ElementForm,
    current_parent: Option<DbId>,
) -> AppResult<PortInput> {
    let element = form.element()?;
    let parent = parent_component(state, form, current_parent).await?;
    Ok(PortInput {
        element,
        component_id: parent.element.id,
        version_id: parent.element.version_id,
    })
}

/// POST /api/v1/ports
pub async fn create(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<DiagramView<Port>>)> {
    let form = ElementForm::from_multipart(multipart).await?;
    let input = port_input(&state, &form, None).await?;

    let saved = create_element::<Port>(&state, &form, &input).await?;
    tracing::info!(
        port_id = %saved.id,
        component_id = %input.component_id,
        parameters_skipped = saved.parameters_skipped,
        "Port created",
    );

    Ok((StatusCode::CREATED, Json(saved.into_view(&state.pool).await?)))
}

/// PUT /api/v1/ports/{id}
///
/// A missing `component` field keeps the current parent.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<Json<DiagramView<Port>>> {
    let form = ElementForm::from_multipart(multipart).await?;
    let existing = find_element::<Port>(&state, id).await?;

    if form.only_notes() {
        return Ok(Json(update_element_notes(&state, id, &form).await?));
    }

    let input = port_input(&state, &form, Some(existing.component_id)).await?;
    let saved = update_element::<Port>(&state, id, &form, &input).await?;
    tracing::info!(
        port_id = %id,
        parameters_skipped = saved.parameters_skipped,
        images_removed = saved.images_removed,
        "Port updated",
    );

    Ok(Json(saved.into_view(&state.pool).await?))
}

/// DELETE /api/v1/ports/{id}
///
/// Interfaces sourced from the port are deleted with it; interfaces
/// targeting it survive with no target.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    delete_element::<Port>(&state, id).await
}
