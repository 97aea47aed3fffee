//! Demo: places a marketplace order and an errand, sends the marketplace rider out and
//! follows it until it arrives.

use amana_rides::checkout::{errand_order, Cart};
use amana_rides::config::SimulationConfig;
use amana_rides::lifecycle::{setup_tracing, DeliverySystem};
use amana_rides::model::{ErrandDetails, OrderStatus, Route};
use tracing::{info, Instrument};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();

    let config = SimulationConfig::from_env()?;
    info!(?config, "Starting delivery simulation");

    let mut system = DeliverySystem::new(config)?;

    let mut cart = Cart::new();
    cart.add("waakye-01", "Waakye Special", 15.0, 2)?;
    cart.add("sobolo-02", "Sobolo (500ml)", 6.5, 1)?;
    let subtotal = cart.subtotal();
    let params = cart.checkout(system.config().marketplace_delivery_fee, Route::default())?;
    let marketplace_id = system.place_order(params).await?;
    info!(order_id = %marketplace_id, subtotal, "Marketplace order placed");

    let errand = ErrandDetails {
        shopping_list: "1 crate of eggs, 2 loaves of bread".to_string(),
        receipt_image: None,
        budget_limit: Some(80.0),
    };
    let errand_id = system
        .place_order(errand_order(errand, Route::default()).deliver_to("Home"))
        .await?;
    info!(order_id = %errand_id, "Errand placed");

    let span = tracing::info_span!("dispatch", order_id = %marketplace_id);
    async {
        while system.status(marketplace_id).await? != OrderStatus::OutForDelivery {
            system.advance(marketplace_id).await?;
        }
        Ok::<_, Box<dyn std::error::Error>>(())
    }
    .instrument(span)
    .await?;

    let poll = system.config().tick_period() * 20;
    while system.is_tracking(marketplace_id) {
        tokio::time::sleep(poll).await;
        let snapshot = system.snapshot(marketplace_id).await?;
        info!(
            position = %snapshot.position,
            eta_minutes = snapshot.eta_minutes,
            progress = snapshot.progress,
            "Rider update"
        );
    }

    system.advance(marketplace_id).await?;
    let status = system.status(marketplace_id).await?;
    info!(order_id = %marketplace_id, %status, "Order complete");

    let orders = system.orders().await?;
    info!(count = orders.len(), "Orders this session");

    system.discard(errand_id).await?;
    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
