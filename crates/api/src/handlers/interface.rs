//! Handlers for the `/interfaces` resource.

use archgraph_core::interface::InterfaceTarget;
use archgraph_core::types::DbId;
use archgraph_db::models::interface::{Interface, InterfaceInput};
use archgraph_db::projections::{DiagramView, InterfaceDetail};
use archgraph_db::repositories::InterfaceRepo;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::error::AppResult;
use crate::forms::ElementForm;
use crate::handlers::element_write::{
    create_element, delete_element, element_diagram, find_element, referenced_port,
    referenced_subcomponent, update_element, update_element_notes,
};
use crate::state::AppState;

/// GET /api/v1/interfaces
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Interface>>> {
    let interfaces = InterfaceRepo::list(&state.pool).await?;
    Ok(Json(interfaces))
}

/// GET /api/v1/interfaces/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<InterfaceDetail>> {
    let interface = find_element::<Interface>(&state, id).await?;
    let detail =
        InterfaceDetail::load(&state.pool, state.collaborators.as_ref(), &interface).await?;
    Ok(Json(detail))
}

/// GET /api/v1/interfaces/{id}/diagram
pub async fn get_diagram(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DiagramView<Interface>>> {
    Ok(Json(element_diagram(&state, id).await?))
}

/// Build the interface input from a form, checking every referenced port
/// and sub-component. Fields absent from the form fall back to `existing`.
async fn interface_input(
    state: &AppState,
    form: &ElementForm,
    existing: Option<&Interface>,
) -> AppResult<InterfaceInput> {
    let element = form.element_unnamed()?;
    let interface_type = form.interface_type()?;

    let port_from_id = match (form.optional_id("port_from")?, existing) {
        (Some(id), _) => id,
        (None, Some(current)) if !form.has("port_from") => current.port_from_id,
        _ => form.required_id("port_from")?,
    };
    let port_from = referenced_port(state, "port_from", port_from_id).await?;

    let port_to_port = match existing {
        Some(current) if !form.has("port_to_port") => current.port_to_port_id,
        _ => form.optional_id("port_to_port")?,
    };
    let port_to_subcomponent = match existing {
        Some(current) if !form.has("port_to_subcomponent") => current.port_to_subcomponent_id,
        _ => form.optional_id("port_to_subcomponent")?,
    };
    let target = InterfaceTarget::from_columns(port_to_port, port_to_subcomponent)?;

    match target {
        InterfaceTarget::Port(id) => {
            referenced_port(state, "port_to_port", id).await?;
        }
        InterfaceTarget::SubComponent(id) => {
            referenced_subcomponent(state, "port_to_subcomponent", id).await?;
        }
        InterfaceTarget::Unconnected => {}
    }

    Ok(InterfaceInput {
        element,
        interface_type,
        port_from_id,
        target,
        version_id: port_from.element.version_id,
    })
}

/// POST /api/v1/interfaces
///
/// The version is inherited from the source port.
pub async fn create(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<DiagramView<Interface>>)> {
    let form = ElementForm::from_multipart(multipart).await?;
    let input = interface_input(&state, &form, None).await?;

    let saved = create_element::<Interface>(&state, &form, &input).await?;
    tracing::info!(
        interface_id = %saved.id,
        port_from = %input.port_from_id,
        interface_type = input.interface_type.as_str(),
        parameters_skipped = saved.parameters_skipped,
        "Interface created",
    );

    Ok((StatusCode::CREATED, Json(saved.into_view(&state.pool).await?)))
}

/// PUT /api/v1/interfaces/{id}
///
/// Omitted `port_from` / target fields keep their current values; a target
/// field sent empty disconnects it.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<Json<DiagramView<Interface>>> {
    let form = ElementForm::from_multipart(multipart).await?;
    let existing = find_element::<Interface>(&state, id).await?;

    if form.only_notes() {
        return Ok(Json(update_element_notes(&state, id, &form).await?));
    }

    let input = interface_input(&state, &form, Some(&existing)).await?;
    let saved = update_element::<Interface>(&state, id, &form, &input).await?;
    tracing::info!(
        interface_id = %id,
        parameters_skipped = saved.parameters_skipped,
        images_removed = saved.images_removed,
        "Interface updated",
    );

    Ok(Json(saved.into_view(&state.pool).await?))
}

/// DELETE /api/v1/interfaces/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    delete_element::<Interface>(&state, id).await
}
