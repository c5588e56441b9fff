//! Route definitions for the `/parameters` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::parameter;
use crate::state::AppState;

/// Routes mounted at `/parameters`.
///
/// ```text
/// GET    /                -> list (?version=)
/// POST   /                -> create
/// GET    /complete        -> list_complete (?version=)
/// GET    /{id}            -> get_by_id
/// PUT    /{id}            -> update
/// DELETE /{id}            -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(parameter::list).post(parameter::create))
        .route("/complete", get(parameter::list_complete))
        .route(
            "/{id}",
            get(parameter::get_by_id)
                .put(parameter::update)
                .delete(parameter::delete),
        )
}
