//! Tenant-facing clients over the store actors.

#[macro_use]
mod macros;

pub mod order_client;
pub mod settings_client;

pub use order_client::*;
pub use settings_client::*;
