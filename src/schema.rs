use serde::Serialize;

use crate::config::Field;

/// Answer to the host's metadata query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metadata {
    pub type_name: String,
    pub version: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeType {
    String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeSchema {
    pub name: &'static str,
    pub markdown_description: &'static str,
    #[serde(rename = "type")]
    pub kind: AttributeType,
    pub required: bool,
    pub sensitive: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schema {
    pub attributes: Vec<AttributeSchema>,
}

impl Schema {
    pub fn attribute(&self, name: &str) -> Option<&AttributeSchema> {
        self.attributes.iter().find(|attribute| attribute.name == name)
    }
}

pub fn provider_schema() -> Schema {
    let attributes = Field::ALL
        .into_iter()
        .map(|field| AttributeSchema {
            name: field.key(),
            markdown_description: field.description(),
            kind: AttributeType::String,
            required: true,
            sensitive: field.is_sensitive(),
        })
        .collect();

    Schema { attributes }
}
