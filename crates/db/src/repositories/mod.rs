//! Repository layer.
//!
//! Each repository is a zero-sized struct. Reads take `&PgPool`; writes take
//! `&mut PgConnection` so callers can run several of them in one transaction
//! (`&mut *tx`).

pub mod collaborator_repo;
pub mod component_repo;
pub mod image_repo;
pub mod interface_repo;
pub mod parameter_repo;
pub mod parameter_type_repo;
pub mod port_repo;
pub mod subcomponent_repo;
pub mod version_repo;

pub use collaborator_repo::{CollaboratorRepo, CollaboratorTable};
pub use component_repo::ComponentRepo;
pub use image_repo::ImageRepo;
pub use interface_repo::InterfaceRepo;
pub use parameter_repo::{ParameterRepo, ParameterSyncReport};
pub use parameter_type_repo::ParameterTypeRepo;
pub use port_repo::PortRepo;
pub use subcomponent_repo::SubComponentRepo;
pub use version_repo::VersionRepo;
