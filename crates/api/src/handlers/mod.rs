pub mod component;
pub mod element_write;
pub mod interface;
pub mod parameter;
pub mod parameter_type;
pub mod port;
pub mod subcomponent;
