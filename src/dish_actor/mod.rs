//! Dish pipelines: field extraction, price checks and the dish mutators.

pub mod checks;
pub mod entity;
pub mod mutators;

pub use entity::*;
