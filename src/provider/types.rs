use std::fmt;

use serde_json::Value;

use crate::client::SharedClient;
use crate::diagnostics::Diagnostics;

/// Checkpoints of a configure cycle where it can stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CycleStage {
    ReadInput,
    ValidateUnknown,
    ValidateEmpty,
    ConstructClient,
}

impl fmt::Display for CycleStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CycleStage::ReadInput => "read-input",
            CycleStage::ValidateUnknown => "validate-unknown",
            CycleStage::ValidateEmpty => "validate-empty",
            CycleStage::ConstructClient => "construct-client",
        };
        write!(f, "{label}")
    }
}

#[derive(Debug, Clone)]
pub struct ConfigureRequest {
    pub config: Value,
}

impl ConfigureRequest {
    pub fn new(config: Value) -> Self {
        Self { config }
    }
}

/// Result of one configure cycle.
///
/// Either the diagnostics contain an error and both data slots are empty, or
/// both slots hold the same client. Only the cycle itself builds one.
#[derive(Debug, Clone)]
pub struct ConfigureResponse {
    diagnostics: Diagnostics,
    resource_data: Option<SharedClient>,
    data_source_data: Option<SharedClient>,
    failed_stage: Option<CycleStage>,
}

impl ConfigureResponse {
    pub(super) fn failed(diagnostics: Diagnostics, stage: CycleStage) -> Self {
        Self {
            diagnostics,
            resource_data: None,
            data_source_data: None,
            failed_stage: Some(stage),
        }
    }

    pub(super) fn ready(diagnostics: Diagnostics, client: SharedClient) -> Self {
        Self {
            diagnostics,
            resource_data: Some(client.clone()),
            data_source_data: Some(client),
            failed_stage: None,
        }
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Client handed to every resource.
    pub fn resource_data(&self) -> Option<&SharedClient> {
        self.resource_data.as_ref()
    }

    /// Client handed to every data source.
    pub fn data_source_data(&self) -> Option<&SharedClient> {
        self.data_source_data.as_ref()
    }

    pub fn failed_stage(&self) -> Option<CycleStage> {
        self.failed_stage
    }

    pub fn is_ready(&self) -> bool {
        self.failed_stage.is_none() && self.resource_data.is_some()
    }

    pub fn client(&self) -> Option<&SharedClient> {
        self.resource_data.as_ref()
    }
}
