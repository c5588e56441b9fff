//! Component: the root node of a diagram.

use archgraph_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

use crate::models::element::{ElementFields, ElementInput};

/// A row from the `components` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Component {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub element: ElementFields,
}

/// DTO for creating or updating a component.
///
/// On update, `version_id: None` keeps the current version.
#[derive(Debug, Clone)]
pub struct ComponentInput {
    pub element: ElementInput,
    pub version_id: Option<DbId>,
}
