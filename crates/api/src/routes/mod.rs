pub mod component;
pub mod health;
pub mod interface;
pub mod parameter;
pub mod parameter_type;
pub mod port;
pub mod subcomponent;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /components[/{id}[/diagram]]          component CRUD, detail, diagram
/// /subcomponents[/{id}[/diagram]]       sub-component CRUD, detail, diagram
/// /ports[/{id}[/diagram]]               port CRUD, detail, diagram
/// /interfaces[/{id}[/diagram]]          interface CRUD, detail, diagram
///
/// /parameters                           list (?version=), create
/// /parameters/complete                  complete listing (?version=)
/// /parameters/{id}                      get, update, delete
///
/// /parameter-types                      list, create
/// /parameter-types/{id}                 get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/components", component::router())
        .nest("/subcomponents", subcomponent::router())
        .nest("/ports", port::router())
        .nest("/interfaces", interface::router())
        .nest("/parameters", parameter::router())
        .nest("/parameter-types", parameter_type::router())
}
