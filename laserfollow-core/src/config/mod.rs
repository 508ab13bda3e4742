//! Configuration types
//!
//! Board-agnostic configuration for the laser follow head. Parsing a
//! configuration file is the board layer's job; this module only defines
//! the shapes, their defaults and validation.

pub mod hardware;
pub mod types;

pub use hardware::*;
pub use types::*;
