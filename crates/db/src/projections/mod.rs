//! Read shapes assembled from several tables.
//!
//! Every shape is its own struct, so a view can only contain what it
//! declares:
//!
//! - [`summary`]: scalar attributes of one element (minimal view).
//! - [`diagram`]: element row + flat parameters + images.
//! - [`detail`]: element + nested parameters, collaborator data and the
//!   kind-specific neighbours.
//! - [`parameter`]: a parameter with its resolved owner, optionally with the
//!   owner's place in the graph.

pub mod detail;
pub mod diagram;
pub mod parameter;
pub mod summary;

pub use detail::{ComponentDetail, InterfaceDetail, PortDetail, SubComponentDetail};
pub use diagram::DiagramView;
pub use parameter::{CompleteParameter, ParameterProjector, ParameterView};
