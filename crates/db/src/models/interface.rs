//! Interface: a connection from a source port to a port or sub-component.

use archgraph_core::error::CoreError;
use archgraph_core::interface::{InterfaceTarget, InterfaceType};
use archgraph_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

use crate::models::element::{ElementFields, ElementInput};

/// A row from the `interfaces` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Interface {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub element: ElementFields,
    #[serde(rename = "type")]
    pub interface_type: String,
    #[serde(rename = "port_from")]
    pub port_from_id: DbId,
    #[serde(rename = "port_to_port")]
    pub port_to_port_id: Option<DbId>,
    #[serde(rename = "port_to_subcomponent")]
    pub port_to_subcomponent_id: Option<DbId>,
}

impl Interface {
    pub fn target(&self) -> Result<InterfaceTarget, CoreError> {
        InterfaceTarget::from_columns(self.port_to_port_id, self.port_to_subcomponent_id)
    }
}

/// DTO for creating or replacing an interface.
///
/// `version_id` is inherited from the source port by the caller.
#[derive(Debug, Clone)]
pub struct InterfaceInput {
    pub element: ElementInput,
    pub interface_type: InterfaceType,
    pub port_from_id: DbId,
    pub target: InterfaceTarget,
    pub version_id: Option<DbId>,
}
