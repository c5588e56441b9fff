//! SubComponent: an element owned by a component.

use archgraph_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

use crate::models::element::{ElementFields, ElementInput};

/// A row from the `subcomponents` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct SubComponent {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub element: ElementFields,
    #[serde(rename = "component")]
    pub component_id: DbId,
}

/// DTO for creating or re-parenting a sub-component.
///
/// `version_id` is inherited from the parent component by the caller.
#[derive(Debug, Clone)]
pub struct SubComponentInput {
    pub element: ElementInput,
    pub component_id: DbId,
    pub version_id: Option<DbId>,
}
