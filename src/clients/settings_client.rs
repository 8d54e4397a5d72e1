use std::collections::BTreeMap;
use tracing::{debug, info, instrument};
use crate::actor_framework::ResourceClient;
use crate::domain::Settings;
use crate::settings_actor::SettingsError;

/// Client for the per-tenant settings store.
#[derive(Clone)]
pub struct SettingsClient {
    inner: ResourceClient<Settings>,
}

impl_client_new!(SettingsClient, Settings);

/// Each tenant owns exactly one settings row, stored under this id.
fn settings_id(owner: &str) -> String {
    format!("settings_{}", owner)
}

impl SettingsClient {
    /// All settings of the tenant; empty when nothing was saved yet.
    #[instrument(skip(self))]
    pub async fn get_settings(&self, owner: String) -> Result<BTreeMap<String, String>, SettingsError> {
        debug!("Sending request");
        let id = settings_id(&owner);
        let row = self.inner.get(owner, id).await?;
        Ok(row.map(|row| row.values).unwrap_or_default())
    }

    /// Upserts the given keys, leaving keys not mentioned untouched.
    #[instrument(skip(self, values))]
    pub async fn update_settings(&self, owner: String, values: BTreeMap<String, String>) -> Result<BTreeMap<String, String>, SettingsError> {
        debug!(keys = values.len(), "Sending request");
        let id = settings_id(&owner);
        let saved = self.inner.upsert(owner, id, values.clone(), values).await?;
        info!("Settings saved");
        Ok(saved.values)
    }
}
