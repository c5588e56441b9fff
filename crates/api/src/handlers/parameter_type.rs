//! Handlers for the `/parameter-types` resource.

use archgraph_core::types::DbId;
use archgraph_db::models::parameter_type::{
    CreateParameterType, ParameterType, UpdateParameterType,
};
use archgraph_db::repositories::ParameterTypeRepo;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/parameter-types
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateParameterType>,
) -> AppResult<(StatusCode, Json<DataResponse<ParameterType>>)> {
    input.validate()?;
    let parameter_type = ParameterTypeRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: parameter_type })))
}

/// GET /api/v1/parameter-types
pub async fn list(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ParameterType>>>> {
    let data = ParameterTypeRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/parameter-types/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ParameterType>>> {
    let data = ParameterTypeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("ParameterType", id))?;
    Ok(Json(DataResponse { data }))
}

/// PUT /api/v1/parameter-types/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateParameterType>,
) -> AppResult<Json<DataResponse<ParameterType>>> {
    input.validate()?;
    let data = ParameterTypeRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("ParameterType", id))?;
    Ok(Json(DataResponse { data }))
}

/// DELETE /api/v1/parameter-types/{id}
///
/// Parameters of this type are deleted with it.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if ParameterTypeRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("ParameterType", id))
    }
}
