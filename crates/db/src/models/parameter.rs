//! Parameters attach a typed name/value pair to exactly one element.

use archgraph_core::error::CoreError;
use archgraph_core::owner::{OwnerColumns, OwnerRef};
use archgraph_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Column list shared across parameter queries.
pub const PARAMETER_COLUMNS: &str = "id, name, value, secret, parameter_type_id, \
    component_id, subcomponent_id, port_id, interface_id, created_at, updated_at";

/// A row from the `parameters` table.
///
/// The owner is stored as four nullable columns; use [`Parameter::owner`]
/// rather than reading them directly.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Parameter {
    pub id: DbId,
    pub name: String,
    pub value: Option<String>,
    pub secret: bool,
    pub parameter_type_id: Option<DbId>,
    pub component_id: Option<DbId>,
    pub subcomponent_id: Option<DbId>,
    pub port_id: Option<DbId>,
    pub interface_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Parameter {
    pub fn owner_columns(&self) -> OwnerColumns {
        OwnerColumns {
            component: self.component_id,
            subcomponent: self.subcomponent_id,
            port: self.port_id,
            interface: self.interface_id,
        }
    }

    /// The single owner of this parameter.
    pub fn owner(&self) -> Result<OwnerRef, CoreError> {
        OwnerRef::try_from(self.owner_columns())
    }
}

/// DTO for creating or replacing a single parameter.
#[derive(Debug, Clone)]
pub struct ParameterInput {
    pub name: String,
    pub value: Option<String>,
    pub secret: bool,
    pub parameter_type_id: DbId,
    pub owner: OwnerRef,
}
