use tracing::{debug, instrument};

use crate::actor_framework::ResourceClient;
use crate::domain::Order;
use crate::error::ApiError;
use crate::pipeline::Reply;

/// Client for the order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl_resource_client!(OrderClient, Order, order, orders);

impl OrderClient {
    /// Deletes a pending order; any other status is refused.
    #[instrument(skip(self))]
    pub async fn delete_order(&self, id: String) -> Result<Reply<Order>, ApiError> {
        debug!("Sending request");
        self.inner.delete(id).await
    }
}
