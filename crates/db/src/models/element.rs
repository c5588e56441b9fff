//! Columns shared by the four graph entity tables.

use archgraph_core::element::SecurityFlags;
use archgraph_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Column list of the shared element fields, in [`ElementFields`] order.
pub const ELEMENT_COLUMNS: &str = "id, name, description, notes, availability, \
    confidentiality, integrity, version_id, created_at, updated_at";

/// Identity, descriptive text and security flags of any graph entity.
///
/// Flattened into each entity row, both for sqlx and for serde.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct ElementFields {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub availability: bool,
    pub confidentiality: bool,
    pub integrity: bool,
    #[serde(rename = "version")]
    pub version_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Writable element fields. Updates replace all of them.
#[derive(Debug, Clone, Default)]
pub struct ElementInput {
    pub name: String,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub flags: SecurityFlags,
}
