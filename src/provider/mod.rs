//! The provider: metadata, schema, the configure cycle, and its extension points.

mod types;

use std::sync::Arc;

use tracing::{Instrument, Span, debug, info, info_span};

use crate::client::{ClientFactory, HttpClientFactory};
use crate::config::{
    EnvLookup, Field, PROVIDER_TYPE_NAME, ProcessEnv, ProviderModel, ResolvedConfig,
    check_resolved, check_unknown, resolve,
};
use crate::datasource::{self, DataSourceFactory};
use crate::diagnostics::Diagnostics;
use crate::logging::LogContext;
use crate::resource::{self, ResourceFactory};
use crate::schema::{Metadata, Schema, provider_schema};

pub use types::{ConfigureRequest, ConfigureResponse, CycleStage};

pub struct MatrixProvider {
    version: String,
    env: Arc<dyn EnvLookup>,
    factory: Arc<dyn ClientFactory>,
}

impl MatrixProvider {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            env: Arc::new(ProcessEnv),
            factory: Arc::new(HttpClientFactory::default()),
        }
    }

    pub fn with_env<E>(mut self, env: E) -> Self
    where
        E: EnvLookup + 'static,
    {
        self.env = Arc::new(env);
        self
    }

    pub fn with_client_factory<F>(mut self, factory: F) -> Self
    where
        F: ClientFactory + 'static,
    {
        self.factory = Arc::new(factory);
        self
    }

    pub fn metadata(&self) -> Metadata {
        Metadata {
            type_name: PROVIDER_TYPE_NAME.to_string(),
            version: self.version.clone(),
        }
    }

    pub fn schema(&self) -> Schema {
        provider_schema()
    }

    /// Runs one configure cycle.
    ///
    /// Each validation pass runs to completion before its checkpoint, so every
    /// problem of a pass is reported together. The client factory runs only
    /// once both passes are clean, and exactly once.
    pub async fn configure(&self, request: ConfigureRequest) -> ConfigureResponse {
        let mut diagnostics = Diagnostics::new();

        let model = match ProviderModel::from_value(&request.config) {
            Ok(model) => model,
            Err(err) => {
                diagnostics.add_error(
                    "Invalid Provider Configuration",
                    format!("The provider configuration could not be read: {err:#}"),
                );
                return stop(diagnostics, CycleStage::ReadInput);
            }
        };

        check_unknown(&model, &mut diagnostics);
        if diagnostics.has_error() {
            return stop(diagnostics, CycleStage::ValidateUnknown);
        }

        let merged = resolve(&model, self.env.as_ref());
        let resolved = check_resolved(&merged, &mut diagnostics);
        let resolved = match resolved {
            Some(resolved) if !diagnostics.has_error() => resolved,
            _ => return stop(diagnostics, CycleStage::ValidateEmpty),
        };

        let span = client_span(&redaction_context(&resolved));
        span.in_scope(|| debug!("Creating Matrix client"));

        let client = match self.factory.create(&resolved).instrument(span.clone()).await {
            Ok(client) => Arc::new(client),
            Err(err) => {
                diagnostics.add_error(
                    "Unable to Create Matrix API Client",
                    format!(
                        "An unexpected error occurred when creating the Matrix API client. \
                         If the error is not clear, please contact the provider developers.\n\n\
                         Matrix Client Error: {err}"
                    ),
                );
                return stop(diagnostics, CycleStage::ConstructClient);
            }
        };

        span.in_scope(|| info!(success = true, "Configured Matrix client"));
        ConfigureResponse::ready(diagnostics, client)
    }

    pub fn resources(&self) -> Vec<ResourceFactory> {
        resource::all()
    }

    pub fn data_sources(&self) -> Vec<DataSourceFactory> {
        datasource::all()
    }
}

fn stop(diagnostics: Diagnostics, stage: CycleStage) -> ConfigureResponse {
    debug!(
        stage = %stage,
        errors = diagnostics.error_count(),
        "Matrix provider configuration failed"
    );
    ConfigureResponse::failed(diagnostics, stage)
}

/// Log context carrying the resolved settings, with sensitive values masked
/// before anything is emitted through it.
fn redaction_context(resolved: &ResolvedConfig) -> LogContext {
    let ctx = Field::ALL
        .into_iter()
        .fold(LogContext::new(), |ctx, field| ctx.with_field(field.key(), resolved.get(field)));
    let sensitive = Field::ALL
        .into_iter()
        .filter(|field| field.is_sensitive())
        .map(Field::key);
    ctx.mask_field_values_with_keys(sensitive)
}

/// Span recording each setting as its own field, read through the context so
/// masked values are recorded as the placeholder.
fn client_span(ctx: &LogContext) -> Span {
    let value = |field: Field| ctx.value(field.key()).unwrap_or_default();
    info_span!(
        "matrix_client",
        client_server_url = %value(Field::ClientServerUrl),
        default_access_token = %value(Field::DefaultAccessToken),
        default_user_id = %value(Field::DefaultUserId),
    )
}
