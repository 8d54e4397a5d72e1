use chrono::NaiveDateTime;
use crate::domain::{Order, Stage};

/// Workflow transitions applied atomically inside the order store.
#[derive(Debug, Clone)]
pub enum OrderAction {
    Advance { at: NaiveDateTime },
    Revert { at: NaiveDateTime },
    /// Archives a shipment-stage order once its phone number checks out.
    ConfirmShipment { at: NaiveDateTime, min_phone_digits: usize },
}

/// Results from OrderActions, carrying the order as stored afterwards.
#[derive(Debug, Clone)]
pub enum OrderActionResult {
    StageChanged { from: Stage, order: Order },
    Shipped { phone: String, order: Order },
}
