//! Route definitions for the `/components` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::component;
use crate::state::AppState;

/// Routes mounted at `/components`.
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
        .route("/", get(component::list).post(component::create))
        .route(
            "/{id}",
            get(component::get_by_id)
                .put(component::update)
                .delete(component::delete),
        )
        .route("/{id}/diagram", get(component::get_diagram))
}
