use indexmap::IndexMap;
use serde::Deserialize;

/// A top-level model declared in a descriptor's `models` map.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModelDescriptor {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(rename = "type", default = "default_model_type")]
    pub model_type: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub properties: IndexMap<String, PropertyDescriptor>,

    #[serde(default)]
    pub required: Vec<String>,

    #[serde(alias = "additionalProperties", default)]
    pub additional_properties: Option<AdditionalDescriptor>,

    /// Element descriptor for array-shaped models.
    #[serde(default)]
    pub items: Option<PropertyDescriptor>,

    #[serde(rename = "enum", default)]
    pub enum_values: Option<Vec<serde_json::Value>>,
}

fn default_model_type() -> String {
    "object".to_string()
}

/// The shapes a legacy `additional_properties` value takes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AdditionalDescriptor {
    /// Map value type name.
    TypeName(String),
    Descriptor(Box<PropertyDescriptor>),
    /// Anything else (`true`, `false`, a number) only marks the map as open.
    Other(serde_json::Value),
}

/// A property, array item or map value descriptor.
///
/// The legacy format distinguishes shapes only by which keys are present;
/// the shape is decided once here so conversion can match on [`PropertyKind`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawProperty")]
pub struct PropertyDescriptor {
    pub description: Option<String>,
    pub kind: PropertyKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PropertyKind {
    /// Colon-qualified model name, e.g. `urn:jsonschema:org:graylog:StreamDTO`.
    Reference(String),
    Array {
        items: Option<Box<PropertyDescriptor>>,
    },
    Object {
        properties: IndexMap<String, PropertyDescriptor>,
        additional_properties: Option<AdditionalDescriptor>,
    },
    Primitive {
        type_name: String,
        format: Option<String>,
        enum_values: Option<Vec<serde_json::Value>>,
        default_value: Option<serde_json::Value>,
    },
}

impl PropertyDescriptor {
    /// A bare primitive descriptor, mostly useful when building inputs by hand.
    pub fn primitive(type_name: &str) -> Self {
        Self {
            description: None,
            kind: PropertyKind::Primitive {
                type_name: type_name.to_string(),
                format: None,
                enum_values: None,
                default_value: None,
            },
        }
    }

    pub fn reference(name: &str) -> Self {
        Self {
            description: None,
            kind: PropertyKind::Reference(name.to_string()),
        }
    }
}

#[derive(Deserialize)]
struct RawProperty {
    #[serde(rename = "$ref", default)]
    ref_path: Option<String>,

    #[serde(rename = "type", default)]
    type_name: Option<String>,

    #[serde(default)]
    description: Option<String>,

    #[serde(default)]
    format: Option<String>,

    #[serde(rename = "default", default)]
    default_value: Option<serde_json::Value>,

    #[serde(rename = "enum", default)]
    enum_values: Option<Vec<serde_json::Value>>,

    #[serde(default)]
    items: Option<Box<PropertyDescriptor>>,

    #[serde(default)]
    properties: Option<IndexMap<String, PropertyDescriptor>>,

    #[serde(alias = "additionalProperties", default)]
    additional_properties: Option<AdditionalDescriptor>,
}

impl From<RawProperty> for PropertyDescriptor {
    fn from(raw: RawProperty) -> Self {
        let kind = if let Some(ref_path) = raw.ref_path {
            PropertyKind::Reference(ref_path)
        } else {
            match raw.type_name.as_deref() {
                Some("array") => PropertyKind::Array { items: raw.items },
                Some("object") | None => PropertyKind::Object {
                    properties: raw.properties.unwrap_or_default(),
                    additional_properties: raw.additional_properties,
                },
                Some(other) => PropertyKind::Primitive {
                    type_name: other.to_string(),
                    format: raw.format,
                    enum_values: raw.enum_values,
                    default_value: raw.default_value,
                },
            }
        };

        PropertyDescriptor {
            description: raw.description,
            kind,
        }
    }
}
