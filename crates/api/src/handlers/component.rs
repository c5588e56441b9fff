//! Handlers for the `/components` resource.

use archgraph_core::types::DbId;
use archgraph_db::models::component::{Component, ComponentInput};
use archgraph_db::projections::{ComponentDetail, DiagramView};
use archgraph_db::repositories::ComponentRepo;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::error::AppResult;
use crate::forms::ElementForm;
use crate::handlers::element_write::{
    create_element, delete_element, element_diagram, find_element, update_element,
    update_element_notes,
};
use crate::state::AppState;

/// GET /api/v1/components
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Component>>> {
    let components = ComponentRepo::list(&state.pool).await?;
    Ok(Json(components))
}

/// GET /api/v1/components/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ComponentDetail>> {
    let component = find_element::<Component>(&state, id).await?;
    let detail =
        ComponentDetail::load(&state.pool, state.collaborators.as_ref(), &component).await?;
    Ok(Json(detail))
}

/// GET /api/v1/components/{id}/diagram
pub async fn get_diagram(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DiagramView<Component>>> {
    Ok(Json(element_diagram(&state, id).await?))
}

fn component_input(form: &ElementForm) -> AppResult<ComponentInput> {
    Ok(ComponentInput {
        element: form.element()?,
        version_id: form.optional_id("version")?,
    })
}

/// POST /api/v1/components
///
/// Multipart form; see [`ElementForm`]. Returns the diagram view.
pub async fn create(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<DiagramView<Component>>)> {
    let form = ElementForm::from_multipart(multipart).await?;
    let input = component_input(&form)?;

    let saved = create_element::<Component>(&state, &form, &input).await?;
    tracing::info!(
        component_id = %saved.id,
        name = %saved.row.element.name,
        parameters_skipped = saved.parameters_skipped,
        "Component created",
    );

    Ok((StatusCode::CREATED, Json(saved.into_view(&state.pool).await?)))
}

/// PUT /api/v1/components/{id}
///
/// Replaces the scalar fields, parameters and (when `images` is sent) the
/// image set. With `only_notes=1` only the notes change.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<Json<DiagramView<Component>>> {
    let form = ElementForm::from_multipart(multipart).await?;
    find_element::<Component>(&state, id).await?;

    if form.only_notes() {
        return Ok(Json(update_element_notes(&state, id, &form).await?));
    }

    let input = component_input(&form)?;
    let saved = update_element::<Component>(&state, id, &form, &input).await?;
    tracing::info!(
        component_id = %id,
        parameters_skipped = saved.parameters_skipped,
        images_removed = saved.images_removed,
        "Component updated",
    );

    Ok(Json(saved.into_view(&state.pool).await?))
}

/// DELETE /api/v1/components/{id}
///
/// Removes the image files of the component and of everything it cascades
/// to, then the row.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    delete_element::<Component>(&state, id).await
}
