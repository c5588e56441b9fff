//! Handlers for the standalone `/parameters` resource.
//!
//! Element forms replace an owner's whole parameter set; these endpoints
//! work on one parameter at a time, with the owner given explicitly as
//! `{"kind": "port", "id": "..."}`.

use archgraph_core::error::CoreError;
use archgraph_core::owner::OwnerRef;
use archgraph_core::parameter::DEFAULT_PARAMETER_NAME;
use archgraph_core::types::DbId;
use archgraph_db::models::parameter::{Parameter, ParameterInput};
use archgraph_db::projections::{CompleteParameter, ParameterProjector, ParameterView};
use archgraph_db::repositories::{ParameterRepo, ParameterTypeRepo};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Body of `POST` and `PUT /parameters`.
#[derive(Debug, Deserialize, Validate)]
pub struct ParameterRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    pub value: Option<String>,
    #[serde(default)]
    pub secret: bool,
    pub parameter_type: DbId,
    pub owner: OwnerRef,
}

/// `?version=` filter of the listing endpoints.
#[derive(Debug, Deserialize)]
pub struct VersionFilter {
    pub version: Option<DbId>,
}

async fn to_input(state: &AppState, request: ParameterRequest) -> AppResult<ParameterInput> {
    request.validate()?;
    if ParameterTypeRepo::find_by_id(&state.pool, request.parameter_type)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Parameter type {} does not exist",
            request.parameter_type
        ))));
    }
    Ok(ParameterInput {
        name: request
            .name
            .unwrap_or_else(|| DEFAULT_PARAMETER_NAME.to_string()),
        value: request.value,
        secret: request.secret,
        parameter_type_id: request.parameter_type,
        owner: request.owner,
    })
}

async fn find(state: &AppState, id: DbId) -> AppResult<Parameter> {
    ParameterRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Parameter", id))
}

/// GET /api/v1/parameters?version=
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<VersionFilter>,
) -> AppResult<Json<DataResponse<Vec<ParameterView>>>> {
    let parameters = ParameterRepo::list(&state.pool, filter.version).await?;
    let data = ParameterProjector::new(&state.pool).views(&parameters).await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/parameters/complete?version=
pub async fn list_complete(
    State(state): State<AppState>,
    Query(filter): Query<VersionFilter>,
) -> AppResult<Json<DataResponse<Vec<CompleteParameter>>>> {
    let parameters = ParameterRepo::list(&state.pool, filter.version).await?;
    let data = ParameterProjector::new(&state.pool)
        .completes(&parameters)
        .await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/parameters/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ParameterView>>> {
    let parameter = find(&state, id).await?;
    let data = ParameterProjector::new(&state.pool).view(&parameter).await?;
    Ok(Json(DataResponse { data }))
}

/// POST /api/v1/parameters
pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<ParameterRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<ParameterView>>)> {
    let input = to_input(&state, request).await?;
    let mut conn = state.pool.acquire().await?;
    let parameter = ParameterRepo::create(&mut *conn, &input).await?;
    drop(conn);

    tracing::info!(parameter_id = %parameter.id, owner = %input.owner, "Parameter created");

    let data = ParameterProjector::new(&state.pool).view(&parameter).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data })))
}

/// PUT /api/v1/parameters/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(request): Json<ParameterRequest>,
) -> AppResult<Json<DataResponse<ParameterView>>> {
    let input = to_input(&state, request).await?;
    let mut conn = state.pool.acquire().await?;
    let parameter = ParameterRepo::update(&mut *conn, id, &input)
        .await?
        .ok_or(AppError::not_found("Parameter", id))?;
    drop(conn);

    tracing::info!(parameter_id = %id, owner = %input.owner, "Parameter updated");

    let data = ParameterProjector::new(&state.pool).view(&parameter).await?;
    Ok(Json(DataResponse { data }))
}

/// DELETE /api/v1/parameters/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if ParameterRepo::delete(&state.pool, id).await? {
        tracing::info!(parameter_id = %id, "Parameter deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Parameter", id))
    }
}
