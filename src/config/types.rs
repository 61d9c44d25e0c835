use std::fmt;

use serde::Deserialize;

use super::constants::{ENV_CLIENT_SERVER_URL, ENV_DEFAULT_ACCESS_TOKEN, ENV_DEFAULT_USER_ID};

/// The three connection settings the provider understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    ClientServerUrl,
    DefaultAccessToken,
    DefaultUserId,
}

impl Field {
    pub const ALL: [Field; 3] = [
        Field::ClientServerUrl,
        Field::DefaultAccessToken,
        Field::DefaultUserId,
    ];

    /// Attribute name in the structured configuration.
    pub fn key(self) -> &'static str {
        match self {
            Field::ClientServerUrl => "client_server_url",
            Field::DefaultAccessToken => "default_access_token",
            Field::DefaultUserId => "default_user_id",
        }
    }

    pub fn env_var(self) -> &'static str {
        match self {
            Field::ClientServerUrl => ENV_CLIENT_SERVER_URL,
            Field::DefaultAccessToken => ENV_DEFAULT_ACCESS_TOKEN,
            Field::DefaultUserId => ENV_DEFAULT_USER_ID,
        }
    }

    pub fn is_sensitive(self) -> bool {
        matches!(self, Field::DefaultAccessToken)
    }

    pub fn description(self) -> &'static str {
        match self {
            Field::ClientServerUrl => "Address of the matrix server you are acting upon",
            Field::DefaultAccessToken => {
                "The default access token to use for things like content uploads."
            }
            Field::DefaultUserId => {
                "The default user id to use for things like content uploads. This must match the access_token"
            }
        }
    }

    pub fn unknown_summary(self) -> &'static str {
        match self {
            Field::ClientServerUrl => "Unknown Matrix Server URL",
            Field::DefaultAccessToken => "Unknown Default Access Token",
            Field::DefaultUserId => "Unknown Default User ID",
        }
    }

    pub fn missing_summary(self) -> &'static str {
        match self {
            Field::ClientServerUrl => "Missing Matrix Server URL",
            Field::DefaultAccessToken => "Missing Default Access Token",
            Field::DefaultUserId => "Missing Default UserID",
        }
    }

    pub fn invalid_env_summary(self) -> &'static str {
        match self {
            Field::ClientServerUrl => "Invalid Matrix Server URL Environment Variable",
            Field::DefaultAccessToken => "Invalid Default Access Token Environment Variable",
            Field::DefaultUserId => "Invalid Default UserID Environment Variable",
        }
    }

    /// How the value is referred to inside diagnostic details.
    pub(crate) fn subject(self) -> &'static str {
        match self {
            Field::ClientServerUrl => "the Matrix API host",
            Field::DefaultAccessToken => "the default AccessToken",
            Field::DefaultUserId => "the default UserID",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// State of one structured configuration value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConfigValue {
    /// Only known after a later planning step.
    Unknown,
    /// Not provided (`null` or missing).
    #[default]
    Absent,
    Concrete(String),
}

impl ConfigValue {
    pub fn is_unknown(&self) -> bool {
        matches!(self, ConfigValue::Unknown)
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::Concrete(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        ConfigValue::Concrete(value)
    }
}

impl<T: Into<ConfigValue>> From<Option<T>> for ConfigValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(ConfigValue::Absent)
    }
}

/// Structured provider configuration as handed over by the host.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct ProviderModel {
    pub client_server_url: ConfigValue,
    pub default_access_token: ConfigValue,
    pub default_user_id: ConfigValue,
}

impl ProviderModel {
    pub fn get(&self, field: Field) -> &ConfigValue {
        match field {
            Field::ClientServerUrl => &self.client_server_url,
            Field::DefaultAccessToken => &self.default_access_token,
            Field::DefaultUserId => &self.default_user_id,
        }
    }
}

impl fmt::Debug for ProviderModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match &self.default_access_token {
            ConfigValue::Concrete(_) => "Concrete(***)",
            ConfigValue::Unknown => "Unknown",
            ConfigValue::Absent => "Absent",
        };
        f.debug_struct("ProviderModel")
            .field("client_server_url", &self.client_server_url)
            .field("default_access_token", &format_args!("{token}"))
            .field("default_user_id", &self.default_user_id)
            .finish()
    }
}

/// Outcome of merging one field with its environment fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    Value(String),
    /// Neither source produced a non-empty string.
    Missing,
    /// The environment variable is set but could not be read.
    InvalidEnv { reason: String },
}

impl Resolved {
    pub fn value(&self) -> Option<&str> {
        match self {
            Resolved::Value(value) => Some(value),
            Resolved::Missing | Resolved::InvalidEnv { .. } => None,
        }
    }
}

/// All three fields after the environment merge, before the emptiness pass.
#[derive(Clone, PartialEq, Eq)]
pub struct MergedConfig {
    pub client_server_url: Resolved,
    pub default_access_token: Resolved,
    pub default_user_id: Resolved,
}

impl MergedConfig {
    pub fn get(&self, field: Field) -> &Resolved {
        match field {
            Field::ClientServerUrl => &self.client_server_url,
            Field::DefaultAccessToken => &self.default_access_token,
            Field::DefaultUserId => &self.default_user_id,
        }
    }
}

impl fmt::Debug for MergedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match &self.default_access_token {
            Resolved::Value(_) => "Value(***)".to_string(),
            other => format!("{other:?}"),
        };
        f.debug_struct("MergedConfig")
            .field("client_server_url", &self.client_server_url)
            .field("default_access_token", &format_args!("{token}"))
            .field("default_user_id", &self.default_user_id)
            .finish()
    }
}

/// Fully validated connection settings; every value is non-empty.
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub client_server_url: String,
    pub default_access_token: String,
    pub default_user_id: String,
}

impl ResolvedConfig {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::ClientServerUrl => &self.client_server_url,
            Field::DefaultAccessToken => &self.default_access_token,
            Field::DefaultUserId => &self.default_user_id,
        }
    }
}

impl fmt::Debug for ResolvedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedConfig")
            .field("client_server_url", &self.client_server_url)
            .field("default_access_token", &"***")
            .field("default_user_id", &self.default_user_id)
            .finish()
    }
}

// Wire representation of the structured configuration
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum RawValue {
    Text(String),
    Marker(UnknownMarker),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(super) struct UnknownMarker {
    pub unknown: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(super) struct RawProviderConfig {
    #[serde(default)]
    pub client_server_url: Option<RawValue>,
    #[serde(default)]
    pub default_access_token: Option<RawValue>,
    #[serde(default)]
    pub default_user_id: Option<RawValue>,
}
