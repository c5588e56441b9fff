//! Interface edges: type, target and display form.
//!
//! An interface always has a source port. Its destination is either another
//! port, a sub-component, or nothing (a target that was deleted nulls the
//! reference and leaves a half-connected edge behind).

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

pub const TYPE_INTERNAL: &str = "internal";
pub const TYPE_EXTERNAL: &str = "external";

/// Whether the interface stays inside a component or crosses its boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterfaceType {
    Internal,
    #[default]
    External,
}

impl InterfaceType {
    /// Parse the stored / submitted name. An empty value means the default.
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name {
            TYPE_INTERNAL => Ok(Self::Internal),
            TYPE_EXTERNAL | "" => Ok(Self::External),
            other => Err(CoreError::Validation(format!(
                "Invalid interface type '{other}'. Must be one of: {TYPE_INTERNAL}, {TYPE_EXTERNAL}"
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Internal => TYPE_INTERNAL,
            Self::External => TYPE_EXTERNAL,
        }
    }
}

/// Destination of an interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterfaceTarget {
    Port(DbId),
    SubComponent(DbId),
    Unconnected,
}

impl InterfaceTarget {
    /// Build from the two nullable target columns. Both set is rejected.
    pub fn from_columns(
        port_to_port: Option<DbId>,
        port_to_subcomponent: Option<DbId>,
    ) -> Result<Self, CoreError> {
        match (port_to_port, port_to_subcomponent) {
            (Some(_), Some(_)) => Err(CoreError::Validation(
                "An interface targets either a port or a subcomponent, not both".into(),
            )),
            (Some(port), None) => Ok(Self::Port(port)),
            (None, Some(sub)) => Ok(Self::SubComponent(sub)),
            (None, None) => Ok(Self::Unconnected),
        }
    }

    pub fn port_to_port(self) -> Option<DbId> {
        match self {
            Self::Port(id) => Some(id),
            _ => None,
        }
    }

    pub fn port_to_subcomponent(self) -> Option<DbId> {
        match self {
            Self::SubComponent(id) => Some(id),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Display forms
// ---------------------------------------------------------------------------

/// Display form of a port or sub-component: `"{component} - {name}"`.
pub fn describe_attached(component_name: &str, name: &str) -> String {
    format!("{component_name} - {name}")
}

/// Display form of an interface: source and target joined by `<-->`, or the
/// source alone when the interface has no target.
///
/// Display only; never compare these strings.
pub fn describe_interface(from: &str, to: Option<&str>) -> String {
    match to {
        Some(to) => format!("{from} <--> {to}"),
        None => from.to_string(),
    }
}
