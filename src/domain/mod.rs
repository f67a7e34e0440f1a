pub mod dish;
pub mod order;

pub use dish::*;
pub use order::*;
