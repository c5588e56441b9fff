//! Route definitions for the `/parameter-types` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::parameter_type;
use crate::state::AppState;

/// Routes mounted at `/parameter-types`.
///
/// ```text
/// GET    /                -> list
/// POST   /                -> create
/// GET    /{id}            -> get_by_id
/// PUT    /{id}            -> update
/// DELETE /{id}            -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(parameter_type::list).post(parameter_type::create))
        .route(
            "/{id}",
            get(parameter_type::get_by_id)
                .put(parameter_type::update)
                .delete(parameter_type::delete),
        )
}
