//! Fire-and-forget customer notifications.
//!
//! Callers hand a [`Notification`] to the [`NotificationClient`] and move on.
//! Delivery runs on the [`NotificationService`] task. A failed delivery is
//! logged there and never reported back to the caller.

mod gateway;

pub use gateway::*;

use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{error, info, instrument, warn};
use crate::domain::Order;

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub to: String,
    pub message: String,
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum NotifyError {
    #[error("SMS gateway rejected message: {0}")]
    Rejected(String),
    #[error("SMS gateway unavailable: {0}")]
    Unavailable(String),
}

/// Text sent to the customer once the shipment is confirmed. Names the
/// number the order is registered under, the order and the product.
pub fn shipment_message(phone: &str, order: &Order) -> String {
    format!(
        "Dear customer, your order {} ({}) registered under {} has been shipped. Thank you for choosing us, have a nice day.",
        order.id, order.product_name, phone
    )
}

// =============================================================================
// SERVICE
// =============================================================================

pub struct NotificationService<G: SmsGateway> {
    receiver: mpsc::Receiver<Notification>,
    gateway: G,
}

impl<G: SmsGateway> NotificationService<G> {
    pub fn new(buffer_size: usize, gateway: G) -> (Self, NotificationClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        (Self { receiver, gateway }, NotificationClient { sender })
    }

    #[instrument(name = "notification_service", skip(self))]
    pub async fn run(mut self) {
        info!("NotificationService starting");
        while let Some(mut notification) = self.receiver.recv().await {
            notification.to.retain(|c| !c.is_whitespace());
            match self.gateway.send(&notification).await {
                Ok(()) => info!(to = %notification.to, "Notification delivered"),
                Err(e) => error!(to = %notification.to, error = %e, "Notification failed"),
            }
        }
        info!("NotificationService stopped");
    }
}

// =============================================================================
// CLIENT
// =============================================================================

#[derive(Clone)]
pub struct NotificationClient {
    sender: mpsc::Sender<Notification>,
}

impl NotificationClient {
    pub fn new(sender: mpsc::Sender<Notification>) -> Self {
        Self { sender }
    }

    /// Queues a notification without waiting. A full or closed queue is
    /// logged and otherwise ignored.
    #[instrument(skip(self, message))]
    pub fn dispatch(&self, to: String, message: String) {
        if let Err(e) = self.sender.try_send(Notification { to, message }) {
            warn!(error = %e, "Notification dropped");
        }
    }
}
