use serde_json::json;
use tracing::{error, info, Instrument};

use restaurant_orders::api::Router;
use restaurant_orders::app_system::{setup_tracing, RestaurantSystem};
use restaurant_orders::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), String> {
    let config = AppConfig::from_env().map_err(|e| e.to_string())?;

    // Setup tracing once for the entire application
    setup_tracing(&config.log_filter);

    info!(channel_buffer = config.channel_buffer, "Starting restaurant system");

    let system = RestaurantSystem::new(&config).map_err(|e| e.to_string())?;
    let router = Router::new(system.dish_client.clone(), system.order_client.clone());

    let span = tracing::info_span!("menu_setup");
    let dish = async {
        router
            .handle(
                "POST",
                "/dishes",
                json!({ "data": {
                    "name": "Dolcelatte and chickpea spaghetti",
                    "description": "Spaghetti topped with a blend of dolcelatte and fresh chickpeas",
                    "price": 19,
                    "image_url": "https://images.pexels.com/photos/1279330/pexels-photo-1279330.jpeg",
                } }),
            )
            .await
    }
    .instrument(span)
    .await;

    let dish_id = dish
        .body
        .as_ref()
        .and_then(|body| body["data"]["id"].as_str())
        .map(str::to_string)
        .ok_or_else(|| format!("Dish creation failed with status {}", dish.status))?;
    info!(dish_id = %dish_id, "Dish created");

    let span = tracing::info_span!("order_processing");
    let order = async {
        router
            .handle(
                "POST",
                "/orders",
                json!({ "data": {
                    "deliverTo": "308 Negra Arroyo Lane, Albuquerque, NM",
                    "mobileNumber": "(505) 143-3369",
                    "dishes": [{ "dishId": dish_id, "quantity": 2 }],
                } }),
            )
            .await
    }
    .instrument(span)
    .await;

    match order.body.as_ref().and_then(|body| body["data"]["id"].as_str()) {
        Some(order_id) => {
            let order_path = format!("/orders/{}", order_id);
            let moved = router
                .handle(
                    "PUT",
                    &order_path,
                    json!({ "data": {
                        "deliverTo": "308 Negra Arroyo Lane, Albuquerque, NM",
                        "mobileNumber": "(505) 143-3369",
                        "dishes": [{ "dishId": dish_id, "quantity": 2 }],
                        "status": "preparing",
                    } }),
                )
                .await;
            info!(order_id = %order_id, status = moved.status, "Order moved to preparing");

            // Only pending orders can be deleted
            let refused = router.handle("DELETE", &order_path, serde_json::Value::Null).await;
            info!(status = refused.status, body = ?refused.body, "Delete attempt");
        }
        None => error!(status = order.status, body = ?order.body, "Order processing failed"),
    }

    // Shutdown system gracefully
    drop(router);
    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
