//! Order status rules.
//!
//! The only enforced rules are:
//! - a new order always starts as `pending`, whatever the caller sends;
//! - a submitted status must be one of the four known values;
//! - a stored `delivered` order is terminal and accepts no update;
//! - only a stored `pending` order may be deleted.
//!
//! Any other move between `pending`, `preparing` and `out-for-delivery`, in
//! either direction, is accepted.

use serde_json::Value;

use super::OrderStage;
use crate::domain::{Order, OrderStatus};
use crate::error::ApiError;
use crate::payload::field;
use crate::pipeline::Env;

const STATUS_MESSAGE: &str =
    "Order must have a status of pending, preparing, out-for-delivery, delivered";

pub fn body_has_status(stage: &mut OrderStage, _env: &Env<'_, Order>) -> Result<(), ApiError> {
    let status = field(&stage.request.body, "status").ok_or_else(|| ApiError::validation(STATUS_MESSAGE))?;
    stage.raw_status = Some(status.clone());
    Ok(())
}

pub fn status_is_valid(stage: &mut OrderStage, _env: &Env<'_, Order>) -> Result<(), ApiError> {
    let status = stage
        .raw_status
        .as_ref()
        .and_then(Value::as_str)
        .and_then(|s| s.parse::<OrderStatus>().ok())
        .ok_or_else(|| ApiError::validation(STATUS_MESSAGE))?;
    stage.status = Some(status);
    Ok(())
}

/// Checks the *stored* status, so moving an order to `delivered` is allowed
/// and only changing it afterwards is refused.
pub fn status_is_not_delivered(stage: &mut OrderStage, _env: &Env<'_, Order>) -> Result<(), ApiError> {
    if stage.found_status()?.can_be_changed() {
        Ok(())
    } else {
        Err(ApiError::validation("A delivered order cannot be changed"))
    }
}

pub fn order_is_pending(stage: &mut OrderStage, _env: &Env<'_, Order>) -> Result<(), ApiError> {
    if stage.found_status()?.can_be_deleted() {
        Ok(())
    } else {
        Err(ApiError::validation("An order cannot be deleted unless it is pending"))
    }
}
