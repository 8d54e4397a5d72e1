use std::collections::BTreeMap;

pub const WORKSHOP_NAME: &str = "workshop_name";
pub const TAX_NO: &str = "tax_no";
pub const TAX_OFFICE: &str = "tax_office";
pub const ADDRESS: &str = "address";
pub const IBAN: &str = "iban";
pub const BANK_NAME: &str = "bank_name";
pub const ACCOUNT_HOLDER: &str = "account_holder";
pub const LANGUAGE: &str = "language";

/// Per-tenant key/value settings, one row per tenant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    pub id: String,
    pub owner: String,
    pub values: BTreeMap<String, String>,
}

impl Settings {
    /// Merges `incoming` over the stored values; later keys win.
    pub fn merge(&mut self, incoming: BTreeMap<String, String>) {
        self.values.extend(incoming);
    }
}
