//! Archgraph API server library.
//!
//! Exposes the building blocks (config, state, error handling, routes, image
//! store) so integration tests and the binary entrypoint can both use them.

pub mod config;
pub mod error;
pub mod forms;
pub mod handlers;
pub mod images;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
