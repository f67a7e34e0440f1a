use tracing::info;

use super::DishStage;
use crate::domain::Dish;
use crate::error::ApiError;
use crate::pipeline::{Env, Reply};

pub fn list(_stage: DishStage, env: &mut Env<'_, Dish>) -> Result<Reply<Dish>, ApiError> {
    Ok(Reply::Listed(env.store.list_all()))
}

pub fn create(mut stage: DishStage, env: &mut Env<'_, Dish>) -> Result<Reply<Dish>, ApiError> {
    let fields = stage.take_fields()?;
    let dish = Dish {
        id: env.fresh_id()?,
        name: fields.name,
        description: fields.description,
        price: fields.price,
        image_url: fields.image_url,
    };
    env.store
        .insert(dish.clone())
        .map_err(|rejected| ApiError::Internal(format!("Generated dish id already in use: {}", rejected.id)))?;
    info!(dish_id = %dish.id, dish_name = %dish.name, "Dish created");
    Ok(Reply::Created(dish))
}

pub fn read(mut stage: DishStage, _env: &mut Env<'_, Dish>) -> Result<Reply<Dish>, ApiError> {
    Ok(Reply::Found(stage.take_found()?))
}

/// Full replace of every mutable field; the id is kept.
pub fn update(mut stage: DishStage, env: &mut Env<'_, Dish>) -> Result<Reply<Dish>, ApiError> {
    let found = stage.take_found()?;
    let fields = stage.take_fields()?;
    let dish = Dish {
        id: found.id,
        name: fields.name,
        description: fields.description,
        price: fields.price,
        image_url: fields.image_url,
    };
    if env.store.replace(dish.clone()).is_none() {
        return Err(ApiError::not_found(format!("Dish id not found: {}", dish.id)));
    }
    info!(dish_id = %dish.id, "Dish updated");
    Ok(Reply::Updated(dish))
}
