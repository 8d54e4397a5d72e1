mod domain;
mod workflow;
mod metrics;
mod price;

mod actor_framework;
mod order_actor;
mod settings_actor;
mod notification;
mod clients;

mod app_system;

#[cfg(test)]
mod mock_framework;
#[cfg(test)]
mod integration_tests;

use std::collections::BTreeMap;
use tracing::{error, info, warn, Instrument};
use crate::app_system::{OrderSystem, SystemConfig, setup_tracing};
use crate::domain::{NewOrder, WORKSHOP_NAME};

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = SystemConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "Falling back to default configuration");
        SystemConfig::default()
    });
    let locale = config.price_locale;

    info!("Starting workshop order system");
    let system = OrderSystem::new(config);
    let tenant = "workshop_demo".to_string();

    let mut settings = BTreeMap::new();
    settings.insert(WORKSHOP_NAME.to_string(), "Demo Workshop".to_string());
    system.settings_client.update_settings(tenant.clone(), settings).await
        .map_err(|e| e.to_string())?;

    let price = locale.parse("16.000,00");
    let order = NewOrder::new("Ayşe Yılmaz", "Corner sofa", price)
        .with_phone("0532 111 22 33")
        .with_quantity(2, locale.parse("8.000,00"));

    let order_id = system.order_client.create_order(tenant.clone(), order).await
        .map_err(|e| e.to_string())?;
    info!(order_id = %order_id, "Order created successfully");

    let span = tracing::info_span!("production", order_id = %order_id);
    let production = async {
        loop {
            match system.order_client.advance_order(tenant.clone(), order_id.clone()).await {
                Ok(order) if order.status.is_terminal() => break Ok(order),
                Ok(order) => info!(stage = %order.status, "Order moved on"),
                Err(e) => break Err(e),
            }
        }
    }
    .instrument(span)
    .await;

    match production {
        Ok(_) => match system.order_client.confirm_shipment(tenant.clone(), order_id.clone()).await {
            Ok(order) => info!(order_id = %order.id, "Order archived as sale"),
            Err(e) => error!(error = %e, "Shipment confirmation failed"),
        },
        Err(e) => error!(error = %e, "Production failed"),
    }

    match system.order_client.statistics(tenant.clone()).await {
        Ok(stats) => info!(
            active = stats.counters.active,
            completed_this_month = stats.counters.completed_this_month,
            revenue = %locale.format(stats.monthly_revenue),
            "Dashboard"
        ),
        Err(e) => error!(error = %e, "Dashboard unavailable"),
    }

    // Shutdown system gracefully
    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
