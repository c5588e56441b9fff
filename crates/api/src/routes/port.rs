//! Route definitions for the `/ports` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::port;
use crate::state::AppState;

/// Routes mounted at `/ports`.
///
/// ```text
/// GET    /                -> list
/// POST   /                -> create (multipart)
/// GET    /{id}            -> get_by_id (detail view)
/// PUT    /{id}            -> update (multipart)
/// DELETE /{id}            -> delete
/// GET    /{id}/diagram    -> get_diagram
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(port::list).post(port::create))
        .route(
            "/{id}",
            get(port::get_by_id)
                .put(port::update)
                .delete(port::delete),
        )
        .route("/{id}/diagram", get(port::get_diagram))
}
