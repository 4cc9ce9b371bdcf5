//! Domain layer: entities of the token subsystem

pub mod entities;

pub use entities::*;
