use serde_json::Value;

use super::{checks, mutators};
use crate::actor_framework::Resource;
use crate::domain::Dish;
use crate::error::ApiError;
use crate::payload::PipelineRequest;
use crate::pipeline::{Operation, Pipeline};
use crate::store::Keyed;

/// Fields staged by the dish checks for the mutators that follow them.
#[derive(Debug, Default)]
pub struct DishStage {
    pub request: PipelineRequest,
    pub name: Option<String>,
    pub description: Option<String>,
    pub raw_price: Option<Value>,
    pub price: Option<i64>,
    pub image_url: Option<String>,
    /// Record located by `dish_exists`.
    pub found: Option<Dish>,
}

/// Every mutable dish field, as staged by a complete create/update chain.
#[derive(Debug)]
pub struct DishFields {
    pub name: String,
    pub description: String,
    pub price: i64,
    pub image_url: String,
}

impl From<PipelineRequest> for DishStage {
    fn from(request: PipelineRequest) -> Self {
        Self {
            request,
            ..Self::default()
        }
    }
}

impl DishStage {
    pub fn take_fields(&mut self) -> Result<DishFields, ApiError> {
        Ok(DishFields {
            name: self.name.take().ok_or_else(|| unstaged("name"))?,
            description: self.description.take().ok_or_else(|| unstaged("description"))?,
            price: self.price.take().ok_or_else(|| unstaged("price"))?,
            image_url: self.image_url.take().ok_or_else(|| unstaged("image_url"))?,
        })
    }

    pub fn take_found(&mut self) -> Result<Dish, ApiError> {
        self.found.take().ok_or_else(|| unstaged("dish"))
    }
}

fn unstaged(field: &str) -> ApiError {
    ApiError::Internal(format!("Dish {} was not staged", field))
}

impl Keyed for Dish {
    fn key(&self) -> &str {
        &self.id
    }
}

static LIST: Pipeline<DishStage, Dish> = Pipeline {
    name: "dishes.list",
    checks: &[],
    mutator: mutators::list,
};

static CREATE: Pipeline<DishStage, Dish> = Pipeline {
    name: "dishes.create",
    checks: &[
        ("body_has_name", checks::body_has_name),
        ("body_has_description", checks::body_has_description),
        ("body_has_price", checks::body_has_price),
        ("body_has_image_url", checks::body_has_image_url),
        ("price_is_number", checks::price_is_number),
        ("price_is_pos", checks::price_is_pos),
    ],
    mutator: mutators::create,
};

static READ: Pipeline<DishStage, Dish> = Pipeline {
    name: "dishes.read",
    checks: &[("dish_exists", checks::dish_exists)],
    mutator: mutators::read,
};

static UPDATE: Pipeline<DishStage, Dish> = Pipeline {
    name: "dishes.update",
    checks: &[
        ("dish_exists", checks::dish_exists),
        ("dish_id_matches", checks::dish_id_matches),
        ("body_has_name", checks::body_has_name),
        ("body_has_description", checks::body_has_description),
        ("body_has_price", checks::body_has_price),
        ("body_has_image_url", checks::body_has_image_url),
        ("price_is_number", checks::price_is_number),
        ("price_is_pos", checks::price_is_pos),
    ],
    mutator: mutators::update,
};

impl Resource for Dish {
    const NAME: &'static str = "Dish";
    type Stage = DishStage;

    /// Dishes cannot be deleted.
    fn pipeline(operation: Operation) -> Option<&'static Pipeline<DishStage, Dish>> {
        match operation {
            Operation::List => Some(&LIST),
            Operation::Create => Some(&CREATE),
            Operation::Read => Some(&READ),
            Operation::Update => Some(&UPDATE),
            Operation::Delete => None,
        }
    }
}
