//! Order pipelines, including the order status rules.

pub mod checks;
pub mod entity;
pub mod mutators;
pub mod status;

pub use entity::*;
