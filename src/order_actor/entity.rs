use serde_json::Value;

use super::{checks, mutators, status};
use crate::actor_framework::Resource;
use crate::domain::{DishLineItem, Order, OrderStatus};
use crate::error::ApiError;
use crate::payload::PipelineRequest;
use crate::pipeline::{Operation, Pipeline};
use crate::store::Keyed;

/// Fields staged by the order checks for the mutators that follow them.
#[derive(Debug, Default)]
pub struct OrderStage {
    pub request: PipelineRequest,
    pub deliver_to: Option<String>,
    pub mobile_number: Option<String>,
    /// Truthy `dishes` value as submitted, before any shape check.
    pub raw_dishes: Option<Value>,
    /// Line items once the dish list is known to be a non-empty array.
    pub raw_items: Vec<Value>,
    pub dishes: Option<Vec<DishLineItem>>,
    pub raw_status: Option<Value>,
    pub status: Option<OrderStatus>,
    /// Record located by `order_exists`.
    pub found: Option<Order>,
}

impl From<PipelineRequest> for OrderStage {
    fn from(request: PipelineRequest) -> Self {
        Self {
            request,
            ..Self::default()
        }
    }
}

impl OrderStage {
    pub fn take_deliver_to(&mut self) -> Result<String, ApiError> {
        self.deliver_to.take().ok_or_else(|| unstaged("deliverTo"))
    }

    pub fn take_mobile_number(&mut self) -> Result<String, ApiError> {
        self.mobile_number.take().ok_or_else(|| unstaged("mobileNumber"))
    }

    pub fn take_dishes(&mut self) -> Result<Vec<DishLineItem>, ApiError> {
        self.dishes.take().ok_or_else(|| unstaged("dishes"))
    }

    pub fn take_status(&mut self) -> Result<OrderStatus, ApiError> {
        self.status.take().ok_or_else(|| unstaged("status"))
    }

    pub fn take_found(&mut self) -> Result<Order, ApiError> {
        self.found.take().ok_or_else(|| unstaged("order"))
    }

    /// Status of the stored order located by `order_exists`.
    pub fn found_status(&self) -> Result<OrderStatus, ApiError> {
        self.found
            .as_ref()
            .map(|order| order.status)
            .ok_or_else(|| unstaged("order"))
    }
}

fn unstaged(field: &str) -> ApiError {
    ApiError::Internal(format!("Order {} was not staged", field))
}

impl Keyed for Order {
    fn key(&self) -> &str {
        &self.id
    }
}

static LIST: Pipeline<OrderStage, Order> = Pipeline {
    name: "orders.list",
    checks: &[],
    mutator: mutators::list,
};

static CREATE: Pipeline<OrderStage, Order> = Pipeline {
    name: "orders.create",
    checks: &[
        ("body_has_deliver_to", checks::body_has_deliver_to),
        ("body_has_mobile_number", checks::body_has_mobile_number),
        ("body_has_dishes", checks::body_has_dishes),
        ("dishes_are_valid", checks::dishes_are_valid),
        ("dishes_have_quantity", checks::dishes_have_quantity),
        ("dishes_quantity_is_pos", checks::dishes_quantity_is_pos),
    ],
    mutator: mutators::create,
};

static READ: Pipeline<OrderStage, Order> = Pipeline {
    name: "orders.read",
    checks: &[("order_exists", checks::order_exists)],
    mutator: mutators::read,
};

static UPDATE: Pipeline<OrderStage, Order> = Pipeline {
    name: "orders.update",
    checks: &[
        ("order_exists", checks::order_exists),
        ("order_id_matches", checks::order_id_matches),
        ("body_has_deliver_to", checks::body_has_deliver_to),
        ("body_has_mobile_number", checks::body_has_mobile_number),
        ("body_has_dishes", checks::body_has_dishes),
        ("dishes_are_valid", checks::dishes_are_valid),
        ("body_has_status", status::body_has_status),
        ("status_is_valid", status::status_is_valid),
        ("dishes_have_quantity", checks::dishes_have_quantity),
        ("dishes_quantity_is_pos", checks::dishes_quantity_is_pos),
        ("status_is_not_delivered", status::status_is_not_delivered),
    ],
    mutator: mutators::update,
};

static DELETE: Pipeline<OrderStage, Order> = Pipeline {
    name: "orders.delete",
    checks: &[
        ("order_exists", checks::order_exists),
        ("order_is_pending", status::order_is_pending),
    ],
    mutator: mutators::destroy,
};

impl Resource for Order {
    const NAME: &'static str = "Order";
    type Stage = OrderStage;

    fn pipeline(operation: Operation) -> Option<&'static Pipeline<OrderStage, Order>> {
        match operation {
            Operation::List => Some(&LIST),
            Operation::Create => Some(&CREATE),
            Operation::Read => Some(&READ),
            Operation::Update => Some(&UPDATE),
            Operation::Delete => Some(&DELETE),
        }
    }
}
