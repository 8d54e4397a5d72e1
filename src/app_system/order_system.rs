use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use chrono::{Local, NaiveDateTime};
use tracing::{error, info, instrument};
use crate::actor_framework::ResourceActor;
use crate::clients::{OrderClient, SettingsClient};
use crate::domain::{Order, Settings};
use crate::notification::{LoggingGateway, NotificationService, SmsGateway};
use super::SystemConfig;

/// Source of the workshop-local "now".
pub type Clock = Arc<dyn Fn() -> NaiveDateTime + Send + Sync>;

pub fn local_clock() -> Clock {
    Arc::new(|| Local::now().naive_local())
}

fn id_sequence(prefix: &'static str) -> impl Fn() -> String + Send + Sync + 'static {
    let counter = Arc::new(AtomicU64::new(1));
    move || {
        let id = counter.fetch_add(1, Ordering::SeqCst);
        format!("{}_{}", prefix, id)
    }
}

/// The main application system that orchestrates all actors.
///
/// Responsible for starting up actors, wiring them together, and handling shutdown.
pub struct OrderSystem {
    pub order_client: OrderClient,
    pub settings_client: SettingsClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl OrderSystem {
    /// Starts the system with the simulated SMS gateway and the local clock.
    pub fn new(config: SystemConfig) -> Self {
        let gateway = LoggingGateway::new(Duration::from_millis(config.sms_latency_ms));
        Self::with_parts(config, gateway, local_clock())
    }

    #[instrument(name = "order_system", skip_all)]
    pub fn with_parts<G: SmsGateway>(config: SystemConfig, gateway: G, clock: Clock) -> Self {
        info!("Starting order system");
        let config = Arc::new(config);

        // 1. Notifications first; the order client depends on them
        let (notification_service, notification_client) =
            NotificationService::new(config.notification_buffer, gateway);
        let notification_handle = tokio::spawn(notification_service.run());

        // 2. Settings store
        let (settings_actor, settings_resource_client) =
            ResourceActor::<Settings>::new(config.buffer_size, id_sequence("settings"));
        let settings_client = SettingsClient::new(settings_resource_client);
        let settings_handle = tokio::spawn(settings_actor.run());

        // 3. Order store
        let (order_actor, order_resource_client) =
            ResourceActor::<Order>::new(config.buffer_size, id_sequence("order"));
        let order_client = OrderClient::new(order_resource_client, notification_client, clock, config);
        let order_handle = tokio::spawn(order_actor.run());

        info!("Order system started");
        Self {
            order_client,
            settings_client,
            handles: vec![order_handle, settings_handle, notification_handle],
        }
    }

    /// Drops every client so the actor channels close, then waits for the
    /// actors to drain. Notifications already queued are still delivered.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");
        drop(self.order_client);
        drop(self.settings_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
