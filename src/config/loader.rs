use anyhow::{Context, Result, bail};
use serde_json::{Value, json};
use std::io::{self, IsTerminal, Read};
use std::{fs, path::Path};

use super::builder::ProviderModelBuilder;
use super::types::{ConfigValue, Field, ProviderModel, RawProviderConfig, RawValue};

impl ProviderModel {
    pub fn builder() -> ProviderModelBuilder {
        ProviderModelBuilder::new()
    }

    /// Decodes the structured configuration handed over by the host.
    ///
    /// Strings are concrete, `null` or a missing key is absent, and the marker
    /// object `{"unknown": true}` stands for a value not known yet.
    pub fn from_value(value: &Value) -> Result<Self> {
        if !value.is_object() {
            bail!("provider configuration must be an object, got {}", json_kind(value));
        }

        let raw: RawProviderConfig = serde_json::from_value(value.clone())
            .context("Failed to decode provider configuration")?;

        Ok(Self {
            client_server_url: raw_to_config(raw.client_server_url, Field::ClientServerUrl)?,
            default_access_token: raw_to_config(raw.default_access_token, Field::DefaultAccessToken)?,
            default_user_id: raw_to_config(raw.default_user_id, Field::DefaultUserId)?,
        })
    }

    pub fn to_value(&self) -> Value {
        let mut object = serde_json::Map::new();
        for field in Field::ALL {
            let value = match self.get(field) {
                ConfigValue::Unknown => json!({ "unknown": true }),
                ConfigValue::Absent => Value::Null,
                ConfigValue::Concrete(text) => Value::String(text.clone()),
            };
            object.insert(field.key().to_string(), value);
        }
        Value::Object(object)
    }
}

fn raw_to_config(raw: Option<RawValue>, field: Field) -> Result<ConfigValue> {
    match raw {
        None => Ok(ConfigValue::Absent),
        Some(RawValue::Text(text)) => Ok(ConfigValue::Concrete(text)),
        Some(RawValue::Marker(marker)) if marker.unknown => Ok(ConfigValue::Unknown),
        Some(RawValue::Marker(_)) => {
            bail!("{field}: the unknown marker must be {{\"unknown\": true}}")
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Reads raw provider configuration from a JSON file, or from piped stdin when
/// no path is given. Blank input is an empty object.
pub fn load_config_value(path: Option<&Path>) -> Result<Value> {
    let contents = match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed reading config at {}", path.display()))?,
        None => read_piped_stdin()?,
    };

    parse_config_text(&contents)
}

pub fn parse_config_text(contents: &str) -> Result<Value> {
    if contents.trim().is_empty() {
        return Ok(Value::Object(serde_json::Map::new()));
    }

    serde_json::from_str(contents).context("Failed parsing JSON provider configuration")
}

fn read_piped_stdin() -> Result<String> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(String::new());
    }

    let mut buffer = String::new();
    stdin.lock().read_to_string(&mut buffer)?;
    Ok(buffer)
}
