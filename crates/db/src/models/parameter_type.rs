//! Parameter types describe a class of parameter value.

use archgraph_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `parameter_types` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct ParameterType {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    /// Reusable template type rather than an instance-specific one.
    pub generic: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a parameter type.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateParameterType {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub description: Option<String>,
    pub generic: Option<bool>,
}

/// DTO for updating a parameter type. All fields optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateParameterType {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub generic: Option<bool>,
}
