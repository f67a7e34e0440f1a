use serde_json::Value;

use super::DishStage;
use crate::domain::Dish;
use crate::error::ApiError;
use crate::payload::{field, mismatched_id, string_field, StringField};
use crate::pipeline::Env;

const PRICE_MESSAGE: &str = "Dish must have a price that is an integer greater than 0";

fn missing(name: &str) -> ApiError {
    ApiError::validation(format!("Dish must include a {}", name))
}

fn required_string(stage: &DishStage, name: &str) -> Result<String, ApiError> {
    match string_field(&stage.request.body, name) {
        StringField::Present(value) => Ok(value.to_string()),
        StringField::Missing => Err(missing(name)),
        StringField::NotAString(_) => Err(ApiError::validation(format!("Dish {} must be a string", name))),
    }
}

pub fn body_has_name(stage: &mut DishStage, _env: &Env<'_, Dish>) -> Result<(), ApiError> {
    stage.name = Some(required_string(stage, "name")?);
    Ok(())
}

pub fn body_has_description(stage: &mut DishStage, _env: &Env<'_, Dish>) -> Result<(), ApiError> {
    stage.description = Some(required_string(stage, "description")?);
    Ok(())
}

/// Presence only. A price of `0` is falsy and fails here, not in [`price_is_pos`].
pub fn body_has_price(stage: &mut DishStage, _env: &Env<'_, Dish>) -> Result<(), ApiError> {
    let price = field(&stage.request.body, "price").ok_or_else(|| missing("price"))?;
    stage.raw_price = Some(price.clone());
    Ok(())
}

pub fn body_has_image_url(stage: &mut DishStage, _env: &Env<'_, Dish>) -> Result<(), ApiError> {
    stage.image_url = Some(required_string(stage, "image_url")?);
    Ok(())
}

/// Whole numbers only; `12.0` is accepted, `12.5` and `"12"` are not.
fn as_integer(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    value
        .as_f64()
        .filter(|f| f.is_finite() && f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
        .map(|f| f as i64)
}

pub fn price_is_number(stage: &mut DishStage, _env: &Env<'_, Dish>) -> Result<(), ApiError> {
    let price = stage
        .raw_price
        .as_ref()
        .and_then(as_integer)
        .ok_or_else(|| ApiError::validation(PRICE_MESSAGE))?;
    stage.price = Some(price);
    Ok(())
}

pub fn price_is_pos(stage: &mut DishStage, _env: &Env<'_, Dish>) -> Result<(), ApiError> {
    match stage.price {
        Some(price) if price > 0 => Ok(()),
        _ => Err(ApiError::validation(PRICE_MESSAGE)),
    }
}

pub fn dish_exists(stage: &mut DishStage, env: &Env<'_, Dish>) -> Result<(), ApiError> {
    let dish_id = stage.request.route_id();
    match env.store.get(dish_id) {
        Some(dish) => {
            stage.found = Some(dish.clone());
            Ok(())
        }
        None => Err(ApiError::not_found(format!("Dish id not found: {}", dish_id))),
    }
}

/// A payload id is optional, but when given it must equal the route id.
pub fn dish_id_matches(stage: &mut DishStage, _env: &Env<'_, Dish>) -> Result<(), ApiError> {
    let route_id = stage.request.route_id();
    match mismatched_id(&stage.request.body, route_id) {
        Some(id) => Err(ApiError::validation(format!(
            "Dish id does not match route id. Dish: {}, Route: {}",
            id, route_id
        ))),
        _ => Ok(()),
    }
}
