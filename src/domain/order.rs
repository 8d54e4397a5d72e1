use chrono::{NaiveDate, NaiveDateTime};
use super::Stage;

/// A customer order moving through the production pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: String,
    /// Tenant that owns the order.
    pub owner: String,
    pub customer_name: String,
    pub company_name: Option<String>,
    pub customer_phone: Option<String>,
    pub product_name: String,
    pub dimensions: Option<String>,
    /// Gross total, VAT included.
    pub price: f64,
    pub quantity: u32,
    pub unit_price: f64,
    pub status: Stage,
    pub is_shipped: bool,
    pub is_urgent: bool,
    pub delivery_date: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// User input for a new order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewOrder {
    pub customer_name: String,
    pub company_name: Option<String>,
    pub customer_phone: Option<String>,
    pub product_name: String,
    pub dimensions: Option<String>,
    pub price: f64,
    pub quantity: Option<u32>,
    pub unit_price: Option<f64>,
    pub delivery_date: Option<NaiveDate>,
    pub is_urgent: bool,
}

/// Payload handed to the order store. The client stamps the creation time.
#[derive(Debug)]
pub struct OrderCreate {
    pub order: NewOrder,
    pub created_at: NaiveDateTime,
}

impl Order {
    /// Builds a fresh order at the first stage.
    pub fn new(
        id: impl Into<String>,
        owner: impl Into<String>,
        customer_name: impl Into<String>,
        product_name: impl Into<String>,
        price: f64,
        created_at: NaiveDateTime,
    ) -> Self {
        Self {
            id: id.into(),
            owner: owner.into(),
            customer_name: customer_name.into(),
            company_name: None,
            customer_phone: None,
            product_name: product_name.into(),
            dimensions: None,
            price,
            quantity: 1,
            unit_price: 0.0,
            status: Stage::Cutting,
            is_shipped: false,
            is_urgent: false,
            delivery_date: None,
            created_at,
            updated_at: created_at,
        }
    }

    pub fn with_status(mut self, status: Stage) -> Self {
        self.status = status;
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.customer_phone = Some(phone.into());
        self
    }

    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company_name = Some(company.into());
        self
    }

    pub fn with_delivery_date(mut self, date: NaiveDate) -> Self {
        self.delivery_date = Some(date);
        self
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn urgent(mut self) -> Self {
        self.is_urgent = true;
        self
    }

    pub fn shipped(mut self) -> Self {
        self.status = Stage::Shipment;
        self.is_shipped = true;
        self
    }

    /// Still on the production floor: not yet at the terminal stage.
    pub fn is_active(&self) -> bool {
        self.status != Stage::Shipment
    }

    /// Shipment confirmed; the order now only lives in the sales archive.
    pub fn is_archived(&self) -> bool {
        self.is_shipped
    }
}

impl NewOrder {
    pub fn new(customer_name: impl Into<String>, product_name: impl Into<String>, price: f64) -> Self {
        Self {
            customer_name: customer_name.into(),
            product_name: product_name.into(),
            price,
            ..Self::default()
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.customer_phone = Some(phone.into());
        self
    }

    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company_name = Some(company.into());
        self
    }

    pub fn with_delivery_date(mut self, date: NaiveDate) -> Self {
        self.delivery_date = Some(date);
        self
    }

    pub fn with_quantity(mut self, quantity: u32, unit_price: f64) -> Self {
        self.quantity = Some(quantity);
        self.unit_price = Some(unit_price);
        self
    }

    pub fn urgent(mut self) -> Self {
        self.is_urgent = true;
        self
    }
}
