//! Row structs and DTOs.
//!
//! Each submodule contains a `FromRow` row struct and the input DTO used by
//! its repository. Graph entity rows flatten the shared [`element`] fields.

pub mod collaborator;
pub mod component;
pub mod element;
pub mod image;
pub mod interface;
pub mod parameter;
pub mod parameter_type;
pub mod port;
pub mod subcomponent;
pub mod version;
