use anyhow::Result;
use async_trait::async_trait;
use serde_json::{Value, json};

use crate::client::SharedClient;

use super::Resource;

/// `matrix_user_display_name`: display name of the default user.
pub struct UserDisplayNameResource {
    client: SharedClient,
}

impl UserDisplayNameResource {
    pub const TYPE_NAME: &'static str = "matrix_user_display_name";

    pub fn new(client: SharedClient) -> Self {
        Self { client }
    }

    pub fn boxed(client: SharedClient) -> Box<dyn Resource> {
        Box::new(Self::new(client))
    }
}

#[async_trait]
impl Resource for UserDisplayNameResource {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    async fn read(&self) -> Result<Value> {
        let user_id = self.client.user_id();
        let display_name = self.client.display_name(user_id).await?;
        Ok(json!({ "user_id": user_id, "display_name": display_name }))
    }
}
