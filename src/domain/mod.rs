pub mod stage;
pub mod order;
pub mod customer;
pub mod settings;

pub use stage::*;
pub use order::*;
pub use customer::*;
pub use settings::*;
