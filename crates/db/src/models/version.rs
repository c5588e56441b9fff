//! Versions are owned by the release-tracking side of the product; the
//! diagram only references them and passes them through.

use archgraph_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `versions` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Version {
    pub id: DbId,
    pub name: String,
    /// System-under-test snapshot attached to the version, if any.
    pub sut: Option<serde_json::Value>,
    pub created_at: Timestamp,
}
