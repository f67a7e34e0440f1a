//! # Restaurant orders
//!
//! In-memory dishes and orders behind validated check-then-mutate pipelines.
//!
//! - **Domain types** are plain data → [`domain::Dish`], [`domain::Order`]
//! - **Pipelines** are ordered checks ending in one mutator → [`pipeline::Pipeline`]
//! - **Resource actors** own one collection each and run one pipeline at a
//!   time → [`actor_framework::ResourceActor`]
//! - **Clients** are cloneable handles to the actors → [`clients::DishClient`],
//!   [`clients::OrderClient`]
//! - **Router** maps a method and path onto the clients → [`api::Router`]
//! - **System coordinator** starts and stops everything → [`app_system::RestaurantSystem`]
//!
//! ```no_run
//! # use restaurant_orders::{app_system::RestaurantSystem, config::AppConfig};
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let system = RestaurantSystem::new(&AppConfig::default())?;
//! let body = serde_json::json!({ "data": {
//!     "deliverTo": "308 Negra Arroyo Lane",
//!     "mobileNumber": "(505) 143-3369",
//!     "dishes": [{ "dishId": "d351", "quantity": 2 }],
//! } });
//! let created = system.order_client.create_order(body).await?;
//! assert_eq!(created.status(), 201);
//! system.shutdown().await?;
//! # Ok(())
//! # }
//! ```

pub mod actor_framework;
pub mod api;
pub mod app_system;
pub mod clients;
pub mod config;
pub mod dish_actor;
pub mod domain;
pub mod error;
pub mod order_actor;
pub mod payload;
pub mod pipeline;
pub mod store;

#[cfg(test)]
mod mock_framework;
