//! Domain core for the architecture diagram: identities, element flags,
//! parameter ownership, interface targets and the pure helpers the
//! repository and HTTP layers build on.
//!
//! Nothing in this crate performs I/O.

pub mod describe;
pub mod element;
pub mod error;
pub mod form;
pub mod image;
pub mod interface;
pub mod owner;
pub mod parameter;
pub mod types;
