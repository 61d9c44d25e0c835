use super::types::{ConfigValue, ProviderModel};

#[derive(Debug, Default)]
pub struct ProviderModelBuilder {
    model: ProviderModel,
}

impl ProviderModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn client_server_url(mut self, value: impl Into<ConfigValue>) -> Self {
        self.model.client_server_url = value.into();
        self
    }

    pub fn default_access_token(mut self, value: impl Into<ConfigValue>) -> Self {
        self.model.default_access_token = value.into();
        self
    }

    pub fn default_user_id(mut self, value: impl Into<ConfigValue>) -> Self {
        self.model.default_user_id = value.into();
        self
    }

    pub fn build(self) -> ProviderModel {
        self.model
    }
}
