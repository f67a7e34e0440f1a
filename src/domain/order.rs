use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Lifecycle of an order: `pending -> preparing -> out-for-delivery -> delivered`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    Pending,
    Preparing,
    OutForDelivery,
    Delivered,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::Preparing,
        OrderStatus::OutForDelivery,
        OrderStatus::Delivered,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::OutForDelivery => "out-for-delivery",
            OrderStatus::Delivered => "delivered",
        }
    }

    /// `delivered` is terminal.
    pub fn can_be_changed(&self) -> bool {
        !matches!(self, OrderStatus::Delivered)
    }

    pub fn can_be_deleted(&self) -> bool {
        matches!(self, OrderStatus::Pending)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("Unknown order status: {}", s))
    }
}

/// One `{dishId, quantity}` entry of an order.
///
/// Any other keys the caller sent with the line item are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DishLineItem {
    #[serde(rename = "dishId", default, skip_serializing_if = "Option::is_none")]
    pub dish_id: Option<String>,
    pub quantity: u64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DishLineItem {
    pub fn new(dish_id: impl Into<String>, quantity: u64) -> Self {
        Self {
            dish_id: Some(dish_id.into()),
            quantity,
            extra: Map::new(),
        }
    }
}

/// A customer order referencing dishes by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    #[serde(rename = "deliverTo")]
    pub deliver_to: String,
    #[serde(rename = "mobileNumber")]
    pub mobile_number: String,
    pub dishes: Vec<DishLineItem>,
    pub status: OrderStatus,
}

impl Order {
    pub fn new(
        id: impl Into<String>,
        deliver_to: impl Into<String>,
        mobile_number: impl Into<String>,
        dishes: Vec<DishLineItem>,
        status: OrderStatus,
    ) -> Self {
        Self {
            id: id.into(),
            deliver_to: deliver_to.into(),
            mobile_number: mobile_number.into(),
            dishes,
            status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_wire_names() {
        for status in OrderStatus::ALL {
            let parsed: OrderStatus = status.as_str().parse().unwrap();
            assert_eq!(parsed, status);
            assert_eq!(serde_json::to_value(status).unwrap(), json!(status.as_str()));
        }
        assert!("shipped".parse::<OrderStatus>().is_err());
        assert_eq!(OrderStatus::OutForDelivery.to_string(), "out-for-delivery");
    }

    #[test]
    fn test_status_rules() {
        assert!(OrderStatus::Pending.can_be_deleted());
        assert!(!OrderStatus::Preparing.can_be_deleted());
        assert!(OrderStatus::OutForDelivery.can_be_changed());
        assert!(!OrderStatus::Delivered.can_be_changed());
    }

    #[test]
    fn test_order_serializes_with_camel_case_keys() {
        let order = Order::new(
            "o1",
            "1 Main St",
            "555-0100",
            vec![DishLineItem::new("d1", 2)],
            OrderStatus::Pending,
        );
        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "o1",
                "deliverTo": "1 Main St",
                "mobileNumber": "555-0100",
                "dishes": [{ "dishId": "d1", "quantity": 2 }],
                "status": "pending",
            })
        );
        let back: Order = serde_json::from_value(value).unwrap();
        assert_eq!(back, order);
    }

    #[test]
    fn test_line_item_without_dish_id_stays_without_one() {
        let item: DishLineItem = serde_json::from_value(json!({ "quantity": 3, "note": "no onions" })).unwrap();
        assert_eq!(item.dish_id, None);
        assert_eq!(
            serde_json::to_value(&item).unwrap(),
            json!({ "quantity": 3, "note": "no onions" })
        );
    }
}
