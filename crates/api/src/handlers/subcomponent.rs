//! Handlers for the `/subcomponents` resource.

use archgraph_core::types::DbId;
use archgraph_db::models::subcomponent::{SubComponent, SubComponentInput};
use archgraph_db::projections::{DiagramView, SubComponentDetail};
use archgraph_db::repositories::SubComponentRepo;
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

/// GET /api/v1/subcomponents
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<SubComponent>>> {
    let subcomponents = SubComponentRepo::list(&state.pool).await?;
    Ok(Json(subcomponents))
}

/// GET /api/v1/subcomponents/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<SubComponentDetail>> {
    let subcomponent = find_element::<SubComponent>(&state, id).await?;
    let detail = SubComponentDetail::load(&state.pool, state.collaborators.as_ref(), &subcomponent).await?;
    Ok(Json(detail))
}

/// GET /api/v1/subcomponents/{id}/diagram
pub async fn get_diagram(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DiagramView<SubComponent>>> {
    Ok(Json(element_diagram(&state, id).await?))
}

/// The version is inherited from the parent component.
async fn subcomponent_input(
    state: &AppState,
    form: &ElementForm,
    current_parent: Option<DbId>,
) -> AppResult<SubComponentInput> {
    let element = form.element()?;
    let parent = parent_component(state, form, current_parent).await?;
    Ok(SubComponentInput {
        element,
        component_id: parent.element.id,
        version_id: parent.element.version_id,
    })
}

/// POST /api/v1/subcomponents
pub async fn create(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<DiagramView<SubComponent>>)> {
    let form = ElementForm::from_multipart(multipart).await?;
    let input = subcomponent_input(&state, &form, None).await?;

    let saved = create_element::<SubComponent>(&state, &form, &input).await?;
    tracing::info!(
        subcomponent_id = %saved.id,
        component_id = %input.component_id,
        parameters_skipped = saved.parameters_skipped,
        "SubComponent created",
    );

    Ok((StatusCode::CREATED, Json(saved.into_view(&state.pool).await?)))
}

/// PUT /api/v1/subcomponents/{id}
///
/// A missing `component` field keeps the current parent.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<Json<DiagramView<SubComponent>>> {
    let form = ElementForm::from_multipart(multipart).await?;
    let existing = find_element::<SubComponent>(&state, id).await?;

    if form.only_notes() {
        return Ok(Json(update_element_notes(&state, id, &form).await?));
    }

    let input = subcomponent_input(&state, &form, Some(existing.component_id)).await?;
    let saved = update_element::<SubComponent>(&state, id, &form, &input).await?;
    tracing::info!(
        subcomponent_id = %id,
        parameters_skipped = saved.parameters_skipped,
        images_removed = saved.images_removed,
        "SubComponent updated",
    );

    Ok(Json(saved.into_view(&state.pool).await?))
}

/// DELETE /api/v1/subcomponents/{id}
///
/// Interfaces targeting the sub-component survive with no target.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    delete_element::<SubComponent>(&state, id).await
}
