use crate::actor_framework::ResourceClient;
use crate::domain::Dish;

/// Client for the dish actor. Dishes have no delete operation.
#[derive(Clone)]
pub struct DishClient {
    inner: ResourceClient<Dish>,
}

impl_resource_client!(DishClient, Dish, dish, dishes);
