use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A reference or inline schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaOrRef {
    Ref {
        #[serde(rename = "$ref")]
        ref_path: String,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    Schema(Box<Schema>),
}

impl SchemaOrRef {
    /// A reference to a schema under `#/components/schemas/`.
    pub fn component(name: &str) -> Self {
        SchemaOrRef::Ref {
            ref_path: format!("{COMPONENTS_SCHEMAS}{name}"),
            description: None,
        }
    }

    /// Attach a description to either a reference or an inline schema.
    pub fn described(mut self, text: Option<String>) -> Self {
        match &mut self {
            SchemaOrRef::Ref { description, .. } => *description = text,
            SchemaOrRef::Schema(schema) => schema.description = text,
        }
        self
    }

    pub fn inline(schema: Schema) -> Self {
        SchemaOrRef::Schema(Box::new(schema))
    }

    /// The schema name a reference points at: the last `/`-separated segment.
    pub fn ref_target(&self) -> Option<&str> {
        match self {
            SchemaOrRef::Ref { ref_path, .. } => ref_path.rsplit('/').next(),
            SchemaOrRef::Schema(_) => None,
        }
    }
}

pub const COMPONENTS_SCHEMAS: &str = "#/components/schemas/";

/// An OpenAPI 3.0 schema object, limited to what the legacy format can express.
///
/// `type` stays a plain string: unknown legacy type names pass through as-is.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Schema {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "default", skip_serializing_if = "Option::is_none")]
    pub default_value: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, SchemaOrRef>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,

    #[serde(
        rename = "additionalProperties",
        skip_serializing_if = "Option::is_none"
    )]
    pub additional_properties: Option<AdditionalProperties>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaOrRef>>,

    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<serde_json::Value>,
}

impl Schema {
    pub fn of_type(type_name: &str) -> Self {
        Self {
            schema_type: Some(type_name.to_string()),
            ..Default::default()
        }
    }

    /// `{type: object}` with no declared properties.
    pub fn open_object() -> Self {
        Self::of_type("object")
    }

    pub fn array_of(items: SchemaOrRef) -> Self {
        Self {
            schema_type: Some("array".to_string()),
            items: Some(Box::new(items)),
            ..Default::default()
        }
    }
}

/// `additionalProperties` can be a boolean or a schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    Bool(bool),
    Schema(Box<SchemaOrRef>),
}
