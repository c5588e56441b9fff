//! Minimal views: an element's own scalar attributes.
//!
//! Sub-components and ports come in two shapes: with the `component`
//! back-reference, and "owned" without it for embedding under a component
//! that is already known.

use archgraph_core::types::DbId;
use serde::Serialize;

use crate::models::component::Component;
use crate::models::element::ElementFields;
use crate::models::interface::Interface;
use crate::models::parameter_type::ParameterType;
use crate::models::port::Port;
use crate::models::subcomponent::SubComponent;

/// Scalar attributes common to every element summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElementSummary {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub availability: bool,
    pub confidentiality: bool,
    pub integrity: bool,
    pub notes: Option<String>,
}

impl From<&ElementFields> for ElementSummary {
    fn from(e: &ElementFields) -> Self {
        Self {
            id: e.id,
            name: e.name.clone(),
            description: e.description.clone(),
            availability: e.availability,
            confidentiality: e.confidentiality,
            integrity: e.integrity,
            notes: e.notes.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentSummary {
    #[serde(flatten)]
    pub element: ElementSummary,
}

impl From<&Component> for ComponentSummary {
    fn from(c: &Component) -> Self {
        Self {
            element: ElementSummary::from(&c.element),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterfaceSummary {
    #[serde(flatten)]
    pub element: ElementSummary,
}

impl From<&Interface> for InterfaceSummary {
    fn from(i: &Interface) -> Self {
        Self {
            element: ElementSummary::from(&i.element),
        }
    }
}

/// Sub-component summary carrying its parent component id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubComponentSummary {
    #[serde(flatten)]
    pub element: ElementSummary,
    pub component: DbId,
}

impl From<&SubComponent> for SubComponentSummary {
    fn from(s: &SubComponent) -> Self {
        Self {
            element: ElementSummary::from(&s.element),
            component: s.component_id,
        }
    }
}

/// Sub-component summary nested under its own component.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OwnedSubComponentSummary {
    #[serde(flatten)]
    pub element: ElementSummary,
}

impl From<&SubComponent> for OwnedSubComponentSummary {
    fn from(s: &SubComponent) -> Self {
        Self {
            element: ElementSummary::from(&s.element),
        }
    }
}

/// Port summary carrying its parent component id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortSummary {
    #[serde(flatten)]
    pub element: ElementSummary,
    pub component: DbId,
}

impl From<&Port> for PortSummary {
    fn from(p: &Port) -> Self {
        Self {
            element: ElementSummary::from(&p.element),
            component: p.component_id,
        }
    }
}

/// Port summary nested under its own component.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OwnedPortSummary {
    #[serde(flatten)]
    pub element: ElementSummary,
}

impl From<&Port> for OwnedPortSummary {
    fn from(p: &Port) -> Self {
        Self {
            element: ElementSummary::from(&p.element),
        }
    }
}

/// Parameter type without timestamps.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterTypeSummary {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub generic: bool,
}

impl From<&ParameterType> for ParameterTypeSummary {
    fn from(t: &ParameterType) -> Self {
        Self {
            id: t.id,
            name: t.name.clone(),
            description: t.description.clone(),
            generic: t.generic,
        }
    }
}
