//! Typed handles over the resource actors.

#[macro_use]
mod macros;

mod dish_client;
mod order_client;

pub use dish_client::DishClient;
pub use order_client::OrderClient;
