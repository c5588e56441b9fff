//! Attributes shared by every diagram node kind.
//!
//! Components, sub-components, ports and interfaces all carry the same
//! descriptive fields and three security-property flags. The flags are
//! independent: any combination is legal.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Maximum length of an element name, in characters.
pub const MAX_NAME_LEN: usize = 255;

// ---------------------------------------------------------------------------
// Element kinds
// ---------------------------------------------------------------------------

/// The four graph entity kinds. Also the set of possible parameter and
/// image owners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Component,
    SubComponent,
    Port,
    Interface,
}

impl ElementKind {
    /// Wire name, as used in `element_type` and image directory names.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Component => "component",
            Self::SubComponent => "subcomponent",
            Self::Port => "port",
            Self::Interface => "interface",
        }
    }

    /// Entity name used in not-found errors and parent descriptions.
    pub fn entity_name(self) -> &'static str {
        match self {
            Self::Component => "Component",
            Self::SubComponent => "SubComponent",
            Self::Port => "Port",
            Self::Interface => "Interface",
        }
    }

    /// Name of the owner column on tables that reference any element kind
    /// (`parameters`, `image_files`, collaborator tables).
    pub fn owner_column(self) -> &'static str {
        match self {
            Self::Component => "component_id",
            Self::SubComponent => "subcomponent_id",
            Self::Port => "port_id",
            Self::Interface => "interface_id",
        }
    }
}

impl std::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Security flags
// ---------------------------------------------------------------------------

/// Availability / confidentiality / integrity markers of an element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityFlags {
    pub availability: bool,
    pub confidentiality: bool,
    pub integrity: bool,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a required element name.
pub fn validate_element_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation("Field 'name' is required".into()));
    }
    validate_name_length(name)
}

/// Validate an optional element name (interfaces may be unnamed).
pub fn validate_name_length(name: &str) -> Result<(), CoreError> {
    let len = name.chars().count();
    if len > MAX_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "Field 'name' is {len} characters, exceeding the maximum of {MAX_NAME_LEN}"
        )));
    }
    Ok(())
}
