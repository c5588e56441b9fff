use std::sync::Arc;

use archgraph_db::collaborators::CollaboratorLookup;

use crate::config::ServerConfig;
use crate::images::ImageStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: archgraph_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Local store for element images.
    pub images: Arc<ImageStore>,
    /// Vulnerabilities, flow executions and versions for detail views.
    pub collaborators: Arc<dyn CollaboratorLookup>,
}
