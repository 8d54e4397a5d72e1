//! Production-stage state machine.
//!
//! Every function here checks all of its guards before touching the order,
//! so a rejected transition leaves the order exactly as it was.

use chrono::NaiveDateTime;
use thiserror::Error;
use crate::domain::{Order, Stage};

/// Reasons a transition is refused.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum WorkflowError {
    #[error("No stage after {0}")]
    NoNextStage(Stage),
    #[error("No stage before {0}")]
    NoPreviousStage(Stage),
    #[error("Order is archived and can no longer change stage")]
    Archived,
    #[error("Shipment can only be confirmed at the shipment stage, order is at {0}")]
    NotAtShipment(Stage),
    #[error("Shipment already confirmed")]
    AlreadyShipped,
    #[error("Customer phone is required to confirm shipment")]
    MissingPhone,
    #[error("Customer phone has {digits} digits, at least {required} required")]
    InvalidPhone { digits: usize, required: usize },
    #[error("Invalid order input: {0}")]
    InvalidInput(String),
}

/// Moves the order one stage forward and returns the new stage.
pub fn advance(order: &mut Order, at: NaiveDateTime) -> Result<Stage, WorkflowError> {
    let next = order.status.next().ok_or(WorkflowError::NoNextStage(order.status))?;
    order.status = next;
    order.updated_at = at;
    Ok(next)
}

/// Moves the order one stage back and returns the new stage.
pub fn revert(order: &mut Order, at: NaiveDateTime) -> Result<Stage, WorkflowError> {
    let previous = order
        .status
        .previous()
        .ok_or(WorkflowError::NoPreviousStage(order.status))?;
    if order.is_shipped {
        return Err(WorkflowError::Archived);
    }
    order.status = previous;
    order.updated_at = at;
    Ok(previous)
}

/// Marks a shipment-stage order as shipped, archiving it.
///
/// Returns the normalized phone number (digits only) the shipment
/// notification should go to.
pub fn confirm_shipment(
    order: &mut Order,
    at: NaiveDateTime,
    min_phone_digits: usize,
) -> Result<String, WorkflowError> {
    let phone = validate_phone(order.customer_phone.as_deref(), min_phone_digits)?;
    if order.status != Stage::Shipment {
        return Err(WorkflowError::NotAtShipment(order.status));
    }
    if order.is_shipped {
        return Err(WorkflowError::AlreadyShipped);
    }
    order.is_shipped = true;
    order.updated_at = at;
    Ok(phone)
}

/// Strips everything but digits and checks the remaining length.
pub fn validate_phone(phone: Option<&str>, min_digits: usize) -> Result<String, WorkflowError> {
    let raw = phone.map(str::trim).filter(|p| !p.is_empty()).ok_or(WorkflowError::MissingPhone)?;
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.len() < min_digits {
        return Err(WorkflowError::InvalidPhone { digits: digits.len(), required: min_digits });
    }
    Ok(digits)
}
