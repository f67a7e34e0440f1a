use serde_json::{Map, Value};

use super::OrderStage;
use crate::domain::{DishLineItem, Order};
use crate::error::ApiError;
use crate::payload::{field, mismatched_id, string_field, StringField};
use crate::pipeline::Env;

fn required_string(stage: &OrderStage, name: &str) -> Result<String, ApiError> {
    match string_field(&stage.request.body, name) {
        StringField::Present(value) => Ok(value.to_string()),
        StringField::Missing => Err(ApiError::validation(format!("Order must include a {}", name))),
        StringField::NotAString(_) => Err(ApiError::validation(format!("Order {} must be a string", name))),
    }
}

pub fn body_has_deliver_to(stage: &mut OrderStage, _env: &Env<'_, Order>) -> Result<(), ApiError> {
    stage.deliver_to = Some(required_string(stage, "deliverTo")?);
    Ok(())
}

pub fn body_has_mobile_number(stage: &mut OrderStage, _env: &Env<'_, Order>) -> Result<(), ApiError> {
    stage.mobile_number = Some(required_string(stage, "mobileNumber")?);
    Ok(())
}

/// Presence only; an empty array is truthy and is caught by [`dishes_are_valid`].
pub fn body_has_dishes(stage: &mut OrderStage, _env: &Env<'_, Order>) -> Result<(), ApiError> {
    let dishes = field(&stage.request.body, "dishes")
        .ok_or_else(|| ApiError::validation("Order must include a dish"))?;
    stage.raw_dishes = Some(dishes.clone());
    Ok(())
}

pub fn dishes_are_valid(stage: &mut OrderStage, _env: &Env<'_, Order>) -> Result<(), ApiError> {
    match stage.raw_dishes.as_ref() {
        Some(Value::Array(items)) if !items.is_empty() => {
            stage.raw_items = items.clone();
            Ok(())
        }
        _ => Err(ApiError::validation("Order must include at least one dish")),
    }
}

/// How a line item is named in error messages: its `dishId`, or its position
/// when it has none.
fn line_item_label(item: &Value, index: usize) -> String {
    match item.get("dishId") {
        Some(Value::String(id)) if !id.is_empty() => id.clone(),
        _ => format!("at index {}", index),
    }
}

fn quantity_error(item: &Value, index: usize) -> ApiError {
    ApiError::validation(format!(
        "Dish {} must have a quantity that is an integer greater than 0",
        line_item_label(item, index)
    ))
}

fn integer_quantity(item: &Value) -> Option<i128> {
    let quantity = item.get("quantity")?;
    if let Some(n) = quantity.as_i64() {
        return Some(n.into());
    }
    if let Some(n) = quantity.as_u64() {
        return Some(n.into());
    }
    quantity
        .as_f64()
        .filter(|f| f.is_finite() && f.fract() == 0.0 && f.abs() < i128::MAX as f64)
        .map(|f| f as i128)
}

/// Reports the first line item, scanning left to right, whose quantity is
/// not an integer.
pub fn dishes_have_quantity(stage: &mut OrderStage, _env: &Env<'_, Order>) -> Result<(), ApiError> {
    match stage
        .raw_items
        .iter()
        .enumerate()
        .find(|(_, item)| integer_quantity(item).is_none())
    {
        Some((index, item)) => Err(quantity_error(item, index)),
        None => Ok(()),
    }
}

/// Reports the first line item whose quantity is below 1, then stages the
/// validated line items.
pub fn dishes_quantity_is_pos(stage: &mut OrderStage, _env: &Env<'_, Order>) -> Result<(), ApiError> {
    let mut dishes = Vec::with_capacity(stage.raw_items.len());
    for (index, item) in stage.raw_items.iter().enumerate() {
        let quantity = integer_quantity(item)
            .filter(|quantity| *quantity >= 1)
            .ok_or_else(|| quantity_error(item, index))?;
        let quantity = u64::try_from(quantity).map_err(|_| {
            ApiError::validation(format!(
                "Dish {} must have a quantity no greater than {}",
                line_item_label(item, index),
                u64::MAX
            ))
        })?;
        dishes.push(line_item(item, index, quantity)?);
    }
    stage.dishes = Some(dishes);
    Ok(())
}

/// Copies the submitted line item; `dishId` stays absent when it was absent.
fn line_item(item: &Value, index: usize, quantity: u64) -> Result<DishLineItem, ApiError> {
    let dish_id = match item.get("dishId") {
        None => None,
        Some(Value::String(id)) => Some(id.clone()),
        Some(_) => {
            return Err(ApiError::validation(format!(
                "Dish at index {} must have a dishId that is a string",
                index
            )))
        }
    };
    let extra: Map<String, Value> = item
        .as_object()
        .map(|object| {
            object
                .iter()
                .filter(|(key, _)| key.as_str() != "dishId" && key.as_str() != "quantity")
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect()
        })
        .unwrap_or_default();
    Ok(DishLineItem {
        dish_id,
        quantity,
        extra,
    })
}

pub fn order_exists(stage: &mut OrderStage, env: &Env<'_, Order>) -> Result<(), ApiError> {
    let order_id = stage.request.route_id();
    match env.store.get(order_id) {
        Some(order) => {
            stage.found = Some(order.clone());
            Ok(())
        }
        None => Err(ApiError::not_found(format!("Order id not found: {}", order_id))),
    }
}

pub fn order_id_matches(stage: &mut OrderStage, _env: &Env<'_, Order>) -> Result<(), ApiError> {
    let route_id = stage.request.route_id();
    match mismatched_id(&stage.request.body, route_id) {
        Some(id) => Err(ApiError::validation(format!(
            "Order id does not match route id. Order: {}, Route: {}",
            id, route_id
        ))),
        _ => Ok(()),
    }
}
