//! Route definitions for the `/subcomponents` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::subcomponent;
use crate::state::AppState;

/// Routes mounted at `/subcomponents`.
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
        .route("/", get(subcomponent::list).post(subcomponent::create))
        .route(
            "/{id}",
            get(subcomponent::get_by_id)
                .put(subcomponent::update)
                .delete(subcomponent::delete),
        )
        .route("/{id}/diagram", get(subcomponent::get_diagram))
}
