//! Resources exposed by the provider. Each one is built from the shared client.

mod display_name;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use crate::client::SharedClient;

pub use display_name::UserDisplayNameResource;

#[async_trait]
pub trait Resource: Send + Sync {
    fn type_name(&self) -> &'static str;

    /// Current remote state of the resource.
    async fn read(&self) -> Result<Value>;
}

pub type ResourceFactory = fn(SharedClient) -> Box<dyn Resource>;

pub fn all() -> Vec<ResourceFactory> {
    vec![UserDisplayNameResource::boxed as ResourceFactory]
}
