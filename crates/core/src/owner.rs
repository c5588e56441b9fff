//! Parameter (and image) ownership.
//!
//! Storage keeps one nullable reference column per element kind so that
//! foreign-key cascades keep working. Everything above storage works with
//! [`OwnerRef`], which can only name a single owner.

use serde::{Deserialize, Serialize};

use crate::element::ElementKind;
use crate::error::CoreError;
use crate::types::DbId;

/// The one element a parameter or image is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum OwnerRef {
    Component(DbId),
    SubComponent(DbId),
    Port(DbId),
    Interface(DbId),
}

impl OwnerRef {
    pub fn new(kind: ElementKind, id: DbId) -> Self {
        match kind {
            ElementKind::Component => Self::Component(id),
            ElementKind::SubComponent => Self::SubComponent(id),
            ElementKind::Port => Self::Port(id),
            ElementKind::Interface => Self::Interface(id),
        }
    }

    pub fn kind(self) -> ElementKind {
        match self {
            Self::Component(_) => ElementKind::Component,
            Self::SubComponent(_) => ElementKind::SubComponent,
            Self::Port(_) => ElementKind::Port,
            Self::Interface(_) => ElementKind::Interface,
        }
    }

    pub fn id(self) -> DbId {
        match self {
            Self::Component(id) | Self::SubComponent(id) | Self::Port(id) | Self::Interface(id) => {
                id
            }
        }
    }

    /// Spread into the four storage columns, exactly one of which is set.
    pub fn columns(self) -> OwnerColumns {
        let mut columns = OwnerColumns::default();
        match self {
            Self::Component(id) => columns.component = Some(id),
            Self::SubComponent(id) => columns.subcomponent = Some(id),
            Self::Port(id) => columns.port = Some(id),
            Self::Interface(id) => columns.interface = Some(id),
        }
        columns
    }
}

impl std::fmt::Display for OwnerRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.kind(), self.id())
    }
}

/// The nullable owner columns as stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OwnerColumns {
    pub component: Option<DbId>,
    pub subcomponent: Option<DbId>,
    pub port: Option<DbId>,
    pub interface: Option<DbId>,
}

impl OwnerColumns {
    fn set_count(&self) -> usize {
        [self.component, self.subcomponent, self.port, self.interface]
            .iter()
            .filter(|c| c.is_some())
            .count()
    }

    /// Pick the owner by fixed priority: component, sub-component, port,
    /// interface. Returns `None` when nothing is set.
    ///
    /// Only meaningful for rows that may predate the single-owner check;
    /// prefer the strict [`TryFrom`] conversion.
    pub fn resolve(&self) -> Option<OwnerRef> {
        resolve_owner(self.component, self.subcomponent, self.port, self.interface)
    }
}

impl TryFrom<OwnerColumns> for OwnerRef {
    type Error = CoreError;

    /// Strict conversion: exactly one column must be set.
    fn try_from(columns: OwnerColumns) -> Result<Self, Self::Error> {
        match columns.set_count() {
            1 => columns
                .resolve()
                .ok_or_else(|| CoreError::Internal("owner column vanished".into())),
            0 => Err(CoreError::Validation(
                "Parameter owner is missing: one of component, subcomponent, port or interface is required".into(),
            )),
            n => Err(CoreError::Validation(format!(
                "Parameter owner is ambiguous: {n} owner references are set, exactly one is allowed"
            ))),
        }
    }
}

/// Resolve the owner of a row from its four nullable references, in
/// priority order component, sub-component, port, interface.
pub fn resolve_owner(
    component: Option<DbId>,
    subcomponent: Option<DbId>,
    port: Option<DbId>,
    interface: Option<DbId>,
) -> Option<OwnerRef> {
    component
        .map(OwnerRef::Component)
        .or_else(|| subcomponent.map(OwnerRef::SubComponent))
        .or_else(|| port.map(OwnerRef::Port))
        .or_else(|| interface.map(OwnerRef::Interface))
}
