//! Thin request router: maps a method and path onto the resource clients and
//! turns pipeline outcomes into a status code and JSON body.
//!
//! Routes:
//! - `GET|POST /dishes`, `GET|PUT /dishes/:dishId`
//! - `GET|POST /orders`, `GET|PUT|DELETE /orders/:orderId`

use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::clients::{DishClient, OrderClient};
use crate::error::ApiError;
use crate::pipeline::Reply;

/// A transport-neutral response: status plus optional JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Option<Value>,
}

impl ApiResponse {
    fn from_reply<R: serde::Serialize>(reply: Reply<R>) -> Self {
        let status = reply.status();
        match reply.into_body() {
            Ok(body) => Self { status, body },
            Err(e) => Self::from_error(&ApiError::Internal(format!("Failed to encode response: {}", e))),
        }
    }

    fn from_error(err: &ApiError) -> Self {
        Self {
            status: err.status(),
            body: serde_json::to_value(err.body()).ok(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Collection {
    Dishes,
    Orders,
}

#[derive(Clone)]
pub struct Router {
    dish_client: DishClient,
    order_client: OrderClient,
}

impl Router {
    pub fn new(dish_client: DishClient, order_client: OrderClient) -> Self {
        Self {
            dish_client,
            order_client,
        }
    }

    #[instrument(skip(self, body))]
    pub async fn handle(&self, method: &str, path: &str, body: Value) -> ApiResponse {
        let result = self.dispatch(method, path, body).await;
        let response = match result {
            Ok(response) => response,
            Err(err) => ApiResponse::from_error(&err),
        };
        if response.status >= 500 {
            warn!(status = response.status, "Request failed");
        } else {
            info!(status = response.status, "Request handled");
        }
        response
    }

    async fn dispatch(&self, method: &str, path: &str, body: Value) -> Result<ApiResponse, ApiError> {
        let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
        let (collection, id) = match segments.as_slice() {
            ["dishes"] => (Collection::Dishes, None),
            ["dishes", id] if !id.is_empty() => (Collection::Dishes, Some(id.to_string())),
            ["orders"] => (Collection::Orders, None),
            ["orders", id] if !id.is_empty() => (Collection::Orders, Some(id.to_string())),
            _ => return Err(ApiError::not_found(format!("Path not found: {}", path))),
        };
        let not_allowed = || ApiError::MethodNotAllowed(format!("{} not allowed for {}", method, path));
        let method = method.to_ascii_uppercase();

        let response = match (collection, id, method.as_str()) {
            (Collection::Dishes, None, "GET") => ApiResponse::from_reply(self.dish_client.list_dishes().await?),
            (Collection::Dishes, None, "POST") => ApiResponse::from_reply(self.dish_client.create_dish(body).await?),
            (Collection::Dishes, Some(id), "GET") => ApiResponse::from_reply(self.dish_client.read_dish(id).await?),
            (Collection::Dishes, Some(id), "PUT") => {
                ApiResponse::from_reply(self.dish_client.update_dish(id, body).await?)
            }
            (Collection::Orders, None, "GET") => ApiResponse::from_reply(self.order_client.list_orders().await?),
            (Collection::Orders, None, "POST") => {
                ApiResponse::from_reply(self.order_client.create_order(body).await?)
            }
            (Collection::Orders, Some(id), "GET") => ApiResponse::from_reply(self.order_client.read_order(id).await?),
            (Collection::Orders, Some(id), "PUT") => {
                ApiResponse::from_reply(self.order_client.update_order(id, body).await?)
            }
            (Collection::Orders, Some(id), "DELETE") => {
                ApiResponse::from_reply(self.order_client.delete_order(id).await?)
            }
            _ => return Err(not_allowed()),
        };
        Ok(response)
    }
}
