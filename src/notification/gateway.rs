use std::future::Future;
use std::time::Duration;
use tracing::info;
use super::{Notification, NotifyError};

/// Outbound SMS provider.
pub trait SmsGateway: Send + 'static {
    fn send(&mut self, notification: &Notification) -> impl Future<Output = Result<(), NotifyError>> + Send;
}

/// Simulated provider: logs the message after an artificial delay.
#[derive(Debug, Clone, Default)]
pub struct LoggingGateway {
    pub latency: Duration,
}

impl LoggingGateway {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

impl SmsGateway for LoggingGateway {
    async fn send(&mut self, notification: &Notification) -> Result<(), NotifyError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        info!(to = %notification.to, message = %notification.message, "SMS sent (simulated)");
        Ok(())
    }
}
