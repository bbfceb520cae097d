use indexmap::IndexMap;
use serde::Deserialize;

use super::model::{ModelDescriptor, PropertyDescriptor};

/// One Swagger 1.2 API declaration, covering a single resource group.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescriptorDocument {
    pub resource_path: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub apis: Vec<ApiEntry>,

    /// Model names are only unique within this document.
    #[serde(default)]
    pub models: IndexMap<String, ModelDescriptor>,
}

/// A concrete path and the operations declared on it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiEntry {
    /// Optional here so that its absence surfaces as a conversion error.
    #[serde(default)]
    pub path: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub operations: Vec<OperationDescriptor>,
}

/// A single method declared on an [`ApiEntry`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationDescriptor {
    pub method: String,

    #[serde(default)]
    pub nickname: Option<String>,

    #[serde(default)]
    pub summary: Option<String>,

    #[serde(default)]
    pub notes: Option<String>,

    #[serde(default)]
    pub parameters: Vec<ParameterDescriptor>,

    #[serde(default)]
    pub response_messages: Vec<ResponseMessage>,

    /// Response model name, a primitive, `void` or `any`.
    #[serde(rename = "type", default)]
    pub response_type: Option<String>,

    /// Element type when `response_type` is `array`.
    #[serde(default)]
    pub items: Option<PropertyDescriptor>,

    #[serde(default)]
    pub produces: Option<Vec<String>>,
}

/// A `{code, message}` pair. Codes arrive as numbers or strings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResponseMessage {
    #[serde(deserialize_with = "code_as_string")]
    pub code: String,

    #[serde(default)]
    pub message: Option<String>,
}

fn code_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Code {
        Number(i64),
        Text(String),
    }

    Ok(match Code::deserialize(deserializer)? {
        Code::Number(n) => n.to_string(),
        Code::Text(s) => s,
    })
}

/// Where a legacy parameter is carried.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum ParamType {
    Path,
    Query,
    Header,
    Body,
    Other(String),
}

impl From<String> for ParamType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "path" => ParamType::Path,
            "query" => ParamType::Query,
            "header" => ParamType::Header,
            "body" => ParamType::Body,
            _ => ParamType::Other(value),
        }
    }
}

/// A legacy operation parameter.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDescriptor {
    pub name: String,

    /// Absent in some hand-written descriptors; treated like an unknown location.
    #[serde(default)]
    pub param_type: Option<ParamType>,

    #[serde(rename = "type", default)]
    pub type_name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub required: Option<bool>,

    #[serde(default)]
    pub default_value: Option<serde_json::Value>,

    #[serde(rename = "enum", default)]
    pub enum_values: Option<Vec<serde_json::Value>>,

    #[serde(default)]
    pub items: Option<PropertyDescriptor>,

    #[serde(default)]
    pub allow_multiple: bool,
}

impl ParameterDescriptor {
    pub fn is_body(&self) -> bool {
        self.param_type == Some(ParamType::Body)
    }
}
