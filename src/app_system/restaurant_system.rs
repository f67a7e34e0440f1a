use tracing::{error, info};
use uuid::Uuid;

use crate::actor_framework::ResourceActor;
use crate::clients::{DishClient, OrderClient};
use crate::config::{AppConfig, ConfigError, SeedData};
use crate::domain::{Dish, Order};
use crate::store::Store;

/// Boxed id generator handed to a resource actor.
pub type IdGenerator = Box<dyn Fn() -> String + Send + Sync>;

/// 32 lowercase hex characters, unique per call.
pub fn random_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Starts the dish and order actors, wires their clients, and shuts them down.
pub struct RestaurantSystem {
    pub dish_client: DishClient,
    pub order_client: OrderClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl RestaurantSystem {
    /// Loads seed data from `config` and starts both actors with random ids.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(config: &AppConfig) -> Result<Self, ConfigError> {
        let seed = config.load_seed()?;
        Ok(Self::with_id_generators(
            config,
            seed,
            Box::new(random_id),
            Box::new(random_id),
        ))
    }

    pub fn with_id_generators(
        config: &AppConfig,
        seed: SeedData,
        next_dish_id: IdGenerator,
        next_order_id: IdGenerator,
    ) -> Self {
        info!(
            dishes = seed.dishes.len(),
            orders = seed.orders.len(),
            "Starting restaurant system"
        );

        // 1. Dish actor
        let (dish_actor, dish_resource_client) =
            ResourceActor::<Dish>::new(config.channel_buffer, Store::seeded(seed.dishes), next_dish_id);
        let dish_client = DishClient::new(dish_resource_client);
        let dish_handle = tokio::spawn(dish_actor.run());

        // 2. Order actor
        let (order_actor, order_resource_client) =
            ResourceActor::<Order>::new(config.channel_buffer, Store::seeded(seed.orders), next_order_id);
        let order_client = OrderClient::new(order_resource_client);
        let order_handle = tokio::spawn(order_actor.run());

        Self {
            dish_client,
            order_client,
            handles: vec![dish_handle, order_handle],
        }
    }

    /// Drops the clients (closing the actor mailboxes) and waits for the actors.
    ///
    /// Clones of the clients held elsewhere keep their actor alive, so drop
    /// those first.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");
        drop(self.dish_client);
        drop(self.order_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
