use tracing::{debug, info};

use super::OrderStage;
use crate::domain::{Order, OrderStatus};
use crate::error::ApiError;
use crate::pipeline::{Env, Reply};

pub fn list(_stage: OrderStage, env: &mut Env<'_, Order>) -> Result<Reply<Order>, ApiError> {
    Ok(Reply::Listed(env.store.list_all()))
}

/// New orders always start as `pending`.
pub fn create(mut stage: OrderStage, env: &mut Env<'_, Order>) -> Result<Reply<Order>, ApiError> {
    let order = Order {
        id: env.fresh_id()?,
        deliver_to: stage.take_deliver_to()?,
        mobile_number: stage.take_mobile_number()?,
        dishes: stage.take_dishes()?,
        status: OrderStatus::Pending,
    };
    env.store
        .insert(order.clone())
        .map_err(|rejected| ApiError::Internal(format!("Generated order id already in use: {}", rejected.id)))?;
    info!(order_id = %order.id, line_items = order.dishes.len(), "Order created");
    Ok(Reply::Created(order))
}

pub fn read(mut stage: OrderStage, _env: &mut Env<'_, Order>) -> Result<Reply<Order>, ApiError> {
    Ok(Reply::Found(stage.take_found()?))
}

/// Full replace of every mutable field; the id is kept.
pub fn update(mut stage: OrderStage, env: &mut Env<'_, Order>) -> Result<Reply<Order>, ApiError> {
    let found = stage.take_found()?;
    let order = Order {
        id: found.id,
        deliver_to: stage.take_deliver_to()?,
        mobile_number: stage.take_mobile_number()?,
        dishes: stage.take_dishes()?,
        status: stage.take_status()?,
    };
    if env.store.replace(order.clone()).is_none() {
        return Err(ApiError::not_found(format!("Order id not found: {}", order.id)));
    }
    info!(order_id = %order.id, from = %found.status, to = %order.status, "Order updated");
    Ok(Reply::Updated(order))
}

/// Removes the located order. A record that is already gone is not an error.
pub fn destroy(mut stage: OrderStage, env: &mut Env<'_, Order>) -> Result<Reply<Order>, ApiError> {
    let found = stage.take_found()?;
    match env.store.remove(&found.id) {
        Some(_) => info!(order_id = %found.id, "Order deleted"),
        None => debug!(order_id = %found.id, "Order was already removed"),
    }
    Ok(Reply::Deleted)
}
