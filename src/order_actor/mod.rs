//! Order-specific store logic: creation rules and workflow actions.

mod actions;
pub mod entity;

pub use actions::*;
