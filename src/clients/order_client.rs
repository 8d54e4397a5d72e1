use std::sync::Arc;
use chrono::NaiveDateTime;
use tracing::{debug, error, info, instrument, warn};
use crate::actor_framework::ResourceClient;
use crate::app_system::{Clock, OrderError, SystemConfig};
use crate::domain::{Customer, NewOrder, Order, OrderCreate, Stage};
use crate::metrics::{self, ArchiveMonth, DailyProductCount, DashboardCounters, InvoiceTotals, Statistics};
use crate::notification::{shipment_message, NotificationClient};
use crate::order_actor::{OrderAction, OrderActionResult};

/// Client for the order store.
///
/// Drives the production workflow and computes dashboard metrics over the
/// caller's own orders. Every call is scoped to a tenant.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
    notifications: NotificationClient,
    clock: Clock,
    config: Arc<SystemConfig>,
}

impl_client_methods!(OrderClient, Order, OrderError, order);

impl OrderClient {
    pub fn new(
        inner: ResourceClient<Order>,
        notifications: NotificationClient,
        clock: Clock,
        config: Arc<SystemConfig>,
    ) -> Self {
        Self {
            inner,
            notifications,
            clock,
            config,
        }
    }

    fn now(&self) -> NaiveDateTime {
        (self.clock)()
    }

    #[instrument(skip(self, order), fields(customer = %order.customer_name))]
    pub async fn create_order(&self, owner: String, order: NewOrder) -> Result<String, OrderError> {
        debug!("Sending request");
        let params = OrderCreate { order, created_at: self.now() };
        let id = self.inner.create(owner, params).await.map_err(|e| {
            warn!(error = %e, "Order creation rejected");
            OrderError::from(e)
        })?;
        info!(order_id = %id, "Order created");
        Ok(id)
    }

    /// All of the tenant's orders, newest first.
    #[instrument(skip(self))]
    pub async fn load_orders(&self, owner: String) -> Result<Vec<Order>, OrderError> {
        debug!("Sending request");
        let mut orders = self.inner.list(owner).await?;
        // The store lists in creation order; reversing first lets the stable
        // sort keep the most recently created order ahead on equal timestamps.
        orders.reverse();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    #[instrument(skip(self))]
    pub async fn advance_order(&self, owner: String, id: String) -> Result<Order, OrderError> {
        self.transition(owner, id, OrderAction::Advance { at: self.now() }).await
    }

    #[instrument(skip(self))]
    pub async fn revert_order(&self, owner: String, id: String) -> Result<Order, OrderError> {
        self.transition(owner, id, OrderAction::Revert { at: self.now() }).await
    }

    async fn transition(&self, owner: String, id: String, action: OrderAction) -> Result<Order, OrderError> {
        debug!("Sending request");
        match self.inner.perform_action(owner, id, action).await {
            Ok(OrderActionResult::StageChanged { from, order }) => {
                info!(%from, to = %order.status, "Order stage changed");
                Ok(order)
            }
            Ok(other) => Err(OrderError::ActorCommunicationError(format!("Unexpected result: {:?}", other))),
            Err(e) => {
                warn!(error = %e, "Stage change rejected");
                Err(e.into())
            }
        }
    }

    /// Hard-deletes the order, whatever its stage.
    #[instrument(skip(self))]
    pub async fn cancel_order(&self, owner: String, id: String) -> Result<(), OrderError> {
        debug!("Sending request");
        self.inner.delete(owner, id).await?;
        info!("Order cancelled");
        Ok(())
    }

    /// Archives a shipment-stage order and texts the customer.
    ///
    /// The SMS is queued after the state change has been stored; a
    /// notification failure never undoes the confirmation.
    #[instrument(skip(self))]
    pub async fn confirm_shipment(&self, owner: String, id: String) -> Result<Order, OrderError> {
        debug!("Sending request");
        let action = OrderAction::ConfirmShipment {
            at: self.now(),
            min_phone_digits: self.config.min_phone_digits,
        };
        match self.inner.perform_action(owner, id, action).await {
            Ok(OrderActionResult::Shipped { phone, order }) => {
                info!(order_id = %order.id, "Shipment confirmed");
                let message = shipment_message(&phone, &order);
                self.notifications.dispatch(phone, message);
                Ok(order)
            }
            Ok(other) => Err(OrderError::ActorCommunicationError(format!("Unexpected result: {:?}", other))),
            Err(e) => {
                warn!(error = %e, "Shipment confirmation rejected");
                Err(e.into())
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn dashboard(&self, owner: String) -> Result<DashboardCounters, OrderError> {
        let orders = self.load_orders(owner).await?;
        Ok(metrics::dashboard_counters(&orders, self.now()))
    }

    /// Urgent orders still in production, soonest delivery first.
    #[instrument(skip(self))]
    pub async fn urgent_orders(&self, owner: String) -> Result<Vec<Order>, OrderError> {
        let orders = self.load_orders(owner).await?;
        Ok(metrics::urgent_orders(&orders, self.now().date(), self.config.urgency_window_days))
    }

    /// Confirmed revenue of the current calendar month.
    #[instrument(skip(self))]
    pub async fn monthly_revenue(&self, owner: String) -> Result<f64, OrderError> {
        let orders = self.load_orders(owner).await?;
        let (start, end) = metrics::month_bounds(self.now().date());
        Ok(metrics::monthly_revenue(&orders, start, end))
    }

    #[instrument(skip(self))]
    pub async fn statistics(&self, owner: String) -> Result<Statistics, OrderError> {
        let orders = self.load_orders(owner).await?;
        Ok(metrics::statistics(&orders, self.now()))
    }

    /// Orders at one stage, newest first.
    #[instrument(skip(self))]
    pub async fn orders_in_stage(&self, owner: String, stage: Stage) -> Result<Vec<Order>, OrderError> {
        let orders = self.load_orders(owner).await?;
        Ok(metrics::orders_in_stage(&orders, stage))
    }

    /// The production board: every stage with the orders still on the floor.
    #[instrument(skip(self))]
    pub async fn production_board(&self, owner: String) -> Result<Vec<(Stage, Vec<Order>)>, OrderError> {
        let orders = self.load_orders(owner).await?;
        Ok(metrics::orders_by_stage(&orders))
    }

    /// Daily order counts of the last seven days per configured product keyword.
    #[instrument(skip(self))]
    pub async fn weekly_chart(&self, owner: String) -> Result<Vec<DailyProductCount>, OrderError> {
        let orders = self.load_orders(owner).await?;
        Ok(metrics::weekly_product_counts(&orders, self.now().date(), &self.config.chart_keywords))
    }

    #[instrument(skip(self))]
    pub async fn customers(&self, owner: String) -> Result<Vec<Customer>, OrderError> {
        let orders = self.load_orders(owner).await?;
        Ok(metrics::unique_customers(&orders))
    }

    /// Shipment-stage orders, newest first.
    #[instrument(skip(self))]
    pub async fn sales_archive(&self, owner: String) -> Result<Vec<Order>, OrderError> {
        let orders = self.load_orders(owner).await?;
        Ok(metrics::sales_archive(&orders))
    }

    #[instrument(skip(self))]
    pub async fn monthly_archive(&self, owner: String) -> Result<Vec<ArchiveMonth>, OrderError> {
        let orders = self.load_orders(owner).await?;
        Ok(metrics::monthly_archive(&orders))
    }

    /// Subtotal/VAT split of one order's price.
    #[instrument(skip(self))]
    pub async fn invoice(&self, owner: String, id: String) -> Result<InvoiceTotals, OrderError> {
        match self.get_order(owner, id.clone()).await? {
            Some(order) => Ok(metrics::invoice_totals(order.price, self.config.vat_rate)),
            None => {
                error!("Order not found for invoice");
                Err(OrderError::NotFound(id))
            }
        }
    }
}
