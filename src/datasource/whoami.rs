use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;

use crate::client::SharedClient;

use super::DataSource;

/// `matrix_whoami`: the identity behind the default access token.
pub struct WhoamiDataSource {
    client: SharedClient,
}

impl WhoamiDataSource {
    pub const TYPE_NAME: &'static str = "matrix_whoami";

    pub fn new(client: SharedClient) -> Self {
        Self { client }
    }

    pub fn boxed(client: SharedClient) -> Box<dyn DataSource> {
        Box::new(Self::new(client))
    }
}

#[async_trait]
impl DataSource for WhoamiDataSource {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    async fn read(&self) -> Result<Value> {
        let whoami = self.client.whoami().await?;
        serde_json::to_value(whoami).context("Failed to serialize whoami response")
    }
}
