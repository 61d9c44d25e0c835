use anyhow::{Result, anyhow};
use std::collections::HashMap;
use std::env;

use super::types::{ConfigValue, Field, MergedConfig, ProviderModel, Resolved};

/// Source of fallback values for settings missing from the structured configuration.
pub trait EnvLookup: Send + Sync {
    fn lookup(&self, key: &str) -> Result<Option<String>>;
}

/// Reads the real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvLookup for ProcessEnv {
    fn lookup(&self, key: &str) -> Result<Option<String>> {
        env_string(key)
    }
}

impl EnvLookup for HashMap<String, String> {
    fn lookup(&self, key: &str) -> Result<Option<String>> {
        Ok(self.get(key).cloned())
    }
}

pub fn env_string(key: &str) -> Result<Option<String>> {
    match env::var(key) {
        Ok(val) => Ok(Some(val)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(anyhow!("{key} contains invalid UTF-8")),
    }
}

/// Merges each structured value with its environment variable.
///
/// A concrete structured value always wins. Otherwise the environment variable
/// is used, and an unset variable counts the same as an empty one.
pub fn resolve(model: &ProviderModel, env: &dyn EnvLookup) -> MergedConfig {
    MergedConfig {
        client_server_url: resolve_field(model, Field::ClientServerUrl, env),
        default_access_token: resolve_field(model, Field::DefaultAccessToken, env),
        default_user_id: resolve_field(model, Field::DefaultUserId, env),
    }
}

fn resolve_field(model: &ProviderModel, field: Field, env: &dyn EnvLookup) -> Resolved {
    match model.get(field) {
        ConfigValue::Concrete(value) => non_empty(value.clone()),
        ConfigValue::Absent | ConfigValue::Unknown => match env.lookup(field.env_var()) {
            Ok(Some(value)) => non_empty(value),
            Ok(None) => Resolved::Missing,
            Err(err) => Resolved::InvalidEnv {
                reason: err.to_string(),
            },
        },
    }
}

fn non_empty(value: String) -> Resolved {
    if value.is_empty() {
        Resolved::Missing
    } else {
        Resolved::Value(value)
    }
}
