//! Connection settings for the Matrix provider.
//!
//! This module covers the configuration side of a configure cycle:
//! - Decoding the structured configuration, including values not known yet
//! - Falling back to `MATRIX_*` environment variables
//! - The unknown-value and empty-value validation passes

mod builder;
mod constants;
mod defaults;
mod environment;
mod loader;
mod types;
mod validation;

pub use builder::ProviderModelBuilder;
pub use constants::{
    DEFAULT_TIMEOUT_SECS, ENV_CLIENT_SERVER_URL, ENV_DEFAULT_ACCESS_TOKEN, ENV_DEFAULT_USER_ID,
    PROVIDER_TYPE_NAME,
};
pub use defaults::{default_timeout, default_user_agent};
pub use environment::{EnvLookup, ProcessEnv, env_string, resolve};
pub use loader::{load_config_value, parse_config_text};
pub use types::{ConfigValue, Field, MergedConfig, ProviderModel, Resolved, ResolvedConfig};
pub use validation::{check_resolved, check_unknown};
