//! System orchestration, configuration, startup, and shutdown logic.

pub mod order_system;
pub mod telemetry;
pub mod system_config;
pub mod error;

pub use order_system::*;
pub use telemetry::*;
pub use system_config::*;
pub use error::*;
