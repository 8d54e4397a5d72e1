use crate::actor_framework::Entity;
use crate::domain::{Order, OrderCreate, Stage};
use crate::workflow::{self, WorkflowError};
use super::actions::{OrderAction, OrderActionResult};

fn required(field: &str, value: String) -> Result<String, WorkflowError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(WorkflowError::InvalidInput(format!("{} is required", field)));
    }
    Ok(trimmed.to_string())
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Entity for Order {
    type Id = String;
    type Owner = String;
    type CreateParams = OrderCreate;
    type Patch = (); // Orders are never edited after creation
    type Action = OrderAction;
    type ActionResult = OrderActionResult;
    type Error = WorkflowError;

    fn id(&self) -> &String { &self.id }

    fn owner(&self) -> &String { &self.owner }

    /// Creates a new Order at the first stage.
    ///
    /// Names are trimmed and required, blank optional fields become `None`,
    /// a missing or zero quantity becomes 1 and a missing unit price 0.
    fn from_create(id: String, owner: String, params: OrderCreate) -> Result<Self, WorkflowError> {
        let input = params.order;
        if !input.price.is_finite() || input.price < 0.0 {
            return Err(WorkflowError::InvalidInput(format!("price must be a non-negative amount, got {}", input.price)));
        }
        let unit_price = input.unit_price.unwrap_or(0.0);
        if !unit_price.is_finite() || unit_price < 0.0 {
            return Err(WorkflowError::InvalidInput(format!("unit price must be a non-negative amount, got {}", unit_price)));
        }

        Ok(Self {
            id,
            owner,
            customer_name: required("customer name", input.customer_name)?,
            company_name: optional(input.company_name),
            customer_phone: optional(input.customer_phone),
            product_name: required("product name", input.product_name)?,
            dimensions: optional(input.dimensions),
            price: input.price,
            quantity: input.quantity.filter(|q| *q > 0).unwrap_or(1),
            unit_price,
            status: Stage::Cutting,
            is_shipped: false,
            is_urgent: input.is_urgent,
            delivery_date: input.delivery_date,
            created_at: params.created_at,
            updated_at: params.created_at,
        })
    }

    fn on_update(&mut self, _patch: ()) -> Result<(), WorkflowError> {
        Ok(())
    }

    /// Applies a workflow transition.
    ///
    /// # Errors
    /// Any [`WorkflowError`] from the state machine; the store then keeps the
    /// order as it was.
    fn handle_action(&mut self, action: OrderAction) -> Result<OrderActionResult, WorkflowError> {
        let from = self.status;
        match action {
            OrderAction::Advance { at } => {
                workflow::advance(self, at)?;
                Ok(OrderActionResult::StageChanged { from, order: self.clone() })
            }
            OrderAction::Revert { at } => {
                workflow::revert(self, at)?;
                Ok(OrderActionResult::StageChanged { from, order: self.clone() })
            }
            OrderAction::ConfirmShipment { at, min_phone_digits } => {
                let phone = workflow::confirm_shipment(self, at, min_phone_digits)?;
                Ok(OrderActionResult::Shipped { phone, order: self.clone() })
            }
        }
    }
}
