//! Route definitions for the `/interfaces` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::interface;
use crate::state::AppState;

/// Routes mounted at `/interfaces`.
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
        .route("/", get(interface::list).post(interface::create))
        .route(
            "/{id}",
            get(interface::get_by_id)
                .put(interface::update)
                .delete(interface::delete),
        )
        .route("/{id}/diagram", get(interface::get_diagram))
}
