use std::collections::BTreeMap;
use crate::actor_framework::Entity;
use crate::domain::Settings;
use super::SettingsError;

fn checked(values: BTreeMap<String, String>) -> Result<BTreeMap<String, String>, SettingsError> {
    values
        .into_iter()
        .map(|(key, value)| {
            let key = key.trim().to_string();
            if key.is_empty() {
                Err(SettingsError::BlankKey)
            } else {
                Ok((key, value))
            }
        })
        .collect()
}

impl Entity for Settings {
    type Id = String;
    type Owner = String;
    type CreateParams = BTreeMap<String, String>;
    type Patch = BTreeMap<String, String>;
    type Action = ();
    type ActionResult = ();
    type Error = SettingsError;

    fn id(&self) -> &String { &self.id }

    fn owner(&self) -> &String { &self.owner }

    fn from_create(id: String, owner: String, params: BTreeMap<String, String>) -> Result<Self, SettingsError> {
        Ok(Self { id, owner, values: checked(params)? })
    }

    /// Merges the patch over the stored values.
    fn on_update(&mut self, patch: BTreeMap<String, String>) -> Result<(), SettingsError> {
        self.merge(checked(patch)?);
        Ok(())
    }

    fn handle_action(&mut self, _action: ()) -> Result<(), SettingsError> {
        Ok(())
    }
}
