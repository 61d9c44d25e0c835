//! Data sources exposed by the provider. Each one is built from the shared client.

mod whoami;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use crate::client::SharedClient;

pub use whoami::WhoamiDataSource;

#[async_trait]
pub trait DataSource: Send + Sync {
    fn type_name(&self) -> &'static str;

    async fn read(&self) -> Result<Value>;
}

pub type DataSourceFactory = fn(SharedClient) -> Box<dyn DataSource>;

pub fn all() -> Vec<DataSourceFactory> {
    vec![WhoamiDataSource::boxed as DataSourceFactory]
}
