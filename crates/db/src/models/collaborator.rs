//! Records other services attach to diagram elements. The diagram core
//! passes them through without interpreting the payload.

use archgraph_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A vulnerability or flow execution attached to an element.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct CollaboratorRecord {
    pub id: DbId,
    pub payload: serde_json::Value,
    pub created_at: Timestamp,
}
