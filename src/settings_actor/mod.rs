//! Per-tenant settings store.

pub mod entity;
pub mod error;

pub use error::*;
