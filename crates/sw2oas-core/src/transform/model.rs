use crate::oas::{AdditionalProperties, Schema, SchemaOrRef};
use crate::parse::model::{AdditionalDescriptor, ModelDescriptor, PropertyDescriptor, PropertyKind};

use super::type_mapper::{is_primitive, map_type};

/// Convert a top-level model into a component schema.
pub fn convert_model(model: &ModelDescriptor) -> Schema {
    if model.model_type == "array" {
        let items = model
            .items
            .as_ref()
            .map(convert_property)
            .unwrap_or_else(|| SchemaOrRef::inline(Schema::open_object()));
        let mut schema = Schema::array_of(items);
        schema.description = model.description.clone();
        return schema;
    }

    let mapped = map_type(&model.model_type);
    Schema {
        schema_type: Some(mapped.type_name.to_string()),
        format: mapped.format.map(str::to_string),
        description: model.description.clone(),
        properties: model
            .properties
            .iter()
            .map(|(name, prop)| (name.clone(), convert_property(prop)))
            .collect(),
        required: model.required.clone(),
        additional_properties: model.additional_properties.as_ref().map(convert_additional),
        enum_values: model.enum_values.clone().unwrap_or_default(),
        ..Default::default()
    }
}

/// Convert a property (or item, or map value) descriptor.
pub fn convert_property(prop: &PropertyDescriptor) -> SchemaOrRef {
    let mut schema = match &prop.kind {
        PropertyKind::Reference(qualified) => {
            return SchemaOrRef::component(local_name(qualified))
                .described(prop.description.clone());
        }
        PropertyKind::Array { items } => Schema::array_of(
            items
                .as_deref()
                .map(convert_property)
                .unwrap_or_else(|| SchemaOrRef::inline(Schema::open_object())),
        ),
        PropertyKind::Object {
            properties,
            additional_properties,
        } => Schema {
            schema_type: Some("object".to_string()),
            properties: properties
                .iter()
                .map(|(name, p)| (name.clone(), convert_property(p)))
                .collect(),
            additional_properties: additional_properties.as_ref().map(convert_additional),
            ..Default::default()
        },
        PropertyKind::Primitive {
            type_name,
            format,
            enum_values,
            default_value,
        } => {
            let mapped = map_type(type_name);
            Schema {
                schema_type: Some(mapped.type_name.to_string()),
                format: format
                    .clone()
                    .or_else(|| mapped.format.map(str::to_string)),
                default_value: default_value.clone(),
                enum_values: enum_values.clone().unwrap_or_default(),
                ..Default::default()
            }
        }
    };

    schema.description = prop.description.clone();
    SchemaOrRef::inline(schema)
}

fn convert_additional(additional: &AdditionalDescriptor) -> AdditionalProperties {
    match additional {
        AdditionalDescriptor::Other(_) => AdditionalProperties::Bool(true),
        AdditionalDescriptor::TypeName(name) => {
            AdditionalProperties::Schema(Box::new(schema_for_type_name(name)))
        }
        AdditionalDescriptor::Descriptor(desc) => {
            AdditionalProperties::Schema(Box::new(convert_property(desc)))
        }
    }
}

/// Inline schema for a primitive type name, or a component reference otherwise.
pub(crate) fn schema_for_type_name(name: &str) -> SchemaOrRef {
    let mapped = map_type(name);
    if is_primitive(mapped.type_name) {
        let mut schema = Schema::of_type(mapped.type_name);
        schema.format = mapped.format.map(str::to_string);
        SchemaOrRef::inline(schema)
    } else {
        SchemaOrRef::component(mapped.type_name)
    }
}

/// The local model name of a colon-qualified reference.
///
/// `urn:jsonschema:org:graylog2:rest:models:StreamDTO` becomes `StreamDTO`.
pub fn local_name(qualified: &str) -> &str {
    qualified.rsplit(':').next().unwrap_or(qualified)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(json: &str) -> ModelDescriptor {
        serde_json::from_str(json).unwrap()
    }

    fn inline(s: &SchemaOrRef) -> &Schema {
        match s {
            SchemaOrRef::Schema(schema) => schema,
            SchemaOrRef::Ref { ref_path, .. } => panic!("unexpected ref {ref_path}"),
        }
    }

    #[test]
    fn test_local_name() {
        assert_eq!(local_name("urn:jsonschema:org:graylog2:StreamDTO"), "StreamDTO");
        assert_eq!(local_name("StreamDTO"), "StreamDTO");
    }

    #[test]
    fn test_reference_property() {
        let prop = PropertyDescriptor::reference("urn:jsonschema:org:graylog:Rule");
        assert_eq!(
            convert_property(&prop),
            SchemaOrRef::Ref {
                ref_path: "#/components/schemas/Rule".to_string(),
                description: None,
            }
        );
    }

    #[test]
    fn test_reference_property_keeps_description() {
        let prop: PropertyDescriptor =
            serde_json::from_str(r#"{"$ref": "a:B", "description": "the owner"}"#).unwrap();
        let converted = convert_property(&prop);
        assert_eq!(
            converted,
            SchemaOrRef::component("B").described(Some("the owner".to_string()))
        );

        let yaml = serde_yaml_ng::to_string(&converted).unwrap();
        assert!(yaml.contains("description: the owner"));
        assert!(yaml.contains("#/components/schemas/B"));
    }

    #[test]
    fn test_array_without_items_is_open_object() {
        let prop: PropertyDescriptor = serde_json::from_str(r#"{"type": "array"}"#).unwrap();
        let converted = convert_property(&prop);
        let schema = inline(&converted);
        assert_eq!(schema.schema_type.as_deref(), Some("array"));
        let items = schema.items.as_deref().expect("items");
        assert_eq!(inline(items).schema_type.as_deref(), Some("object"));
    }

    #[test]
    fn test_primitive_mapping_and_format() {
        let prop: PropertyDescriptor =
            serde_json::from_str(r#"{"type": "long", "description": "count", "default": 3}"#)
                .unwrap();
        let converted = convert_property(&prop);
        let schema = inline(&converted);
        assert_eq!(schema.schema_type.as_deref(), Some("integer"));
        assert_eq!(schema.format.as_deref(), Some("int64"));
        assert_eq!(schema.description.as_deref(), Some("count"));
        assert_eq!(schema.default_value, Some(serde_json::json!(3)));
    }

    #[test]
    fn test_explicit_format_wins_over_hint() {
        let prop: PropertyDescriptor =
            serde_json::from_str(r#"{"type": "long", "format": "utc-millis"}"#).unwrap();
        let converted = convert_property(&prop);
        assert_eq!(inline(&converted).format.as_deref(), Some("utc-millis"));
    }

    #[test]
    fn test_nested_object() {
        let prop: PropertyDescriptor = serde_json::from_str(
            r#"{"type": "object", "properties": {"inner": {"type": "array", "items": {"$ref": "a:B"}}}}"#,
        )
        .unwrap();
        let converted = convert_property(&prop);
        let outer = inline(&converted);
        let inner = inline(&outer.properties["inner"]);
        assert_eq!(
            inner.items.as_deref(),
            Some(&SchemaOrRef::component("B"))
        );
    }

    #[test]
    fn test_model_level_fields() {
        let m = model(
            r#"{
                "id": "urn:jsonschema:Stream",
                "type": "object",
                "description": "A stream",
                "required": ["title"],
                "properties": {
                    "title": {"type": "string"},
                    "rules": {"type": "array", "items": {"$ref": "urn:jsonschema:StreamRule"}}
                }
            }"#,
        );
        let schema = convert_model(&m);
        assert_eq!(schema.schema_type.as_deref(), Some("object"));
        assert_eq!(schema.description.as_deref(), Some("A stream"));
        assert_eq!(schema.required, vec!["title".to_string()]);
        assert_eq!(schema.properties.len(), 2);
        assert!(schema.additional_properties.is_none());
    }

    #[test]
    fn test_model_additional_properties() {
        let flag = convert_model(&model(r#"{"additional_properties": true}"#));
        assert_eq!(flag.additional_properties, Some(AdditionalProperties::Bool(true)));

        for open in ["false", "1", "0.5"] {
            let m = convert_model(&model(&format!(r#"{{"additional_properties": {open}}}"#)));
            assert_eq!(
                m.additional_properties,
                Some(AdditionalProperties::Bool(true)),
                "additional_properties: {open}"
            );
        }

        let typed = convert_model(&model(r#"{"additional_properties": "long"}"#));
        match typed.additional_properties {
            Some(AdditionalProperties::Schema(value)) => {
                assert_eq!(inline(&value).schema_type.as_deref(), Some("integer"));
            }
            other => panic!("expected typed map, got {other:?}"),
        }

        let named = convert_model(&model(r#"{"additional_properties": "StreamDTO"}"#));
        assert_eq!(
            named.additional_properties,
            Some(AdditionalProperties::Schema(Box::new(SchemaOrRef::component(
                "StreamDTO"
            ))))
        );

        let nested = convert_model(&model(
            r#"{"additional_properties": {"type": "array", "items": {"type": "string"}}}"#,
        ));
        match nested.additional_properties {
            Some(AdditionalProperties::Schema(value)) => {
                assert_eq!(inline(&value).schema_type.as_deref(), Some("array"));
            }
            other => panic!("expected nested schema, got {other:?}"),
        }
    }

    #[test]
    fn test_array_model() {
        let schema = convert_model(&model(r#"{"type": "array", "items": {"$ref": "x:Y"}}"#));
        assert_eq!(schema.schema_type.as_deref(), Some("array"));
        assert_eq!(schema.items.as_deref(), Some(&SchemaOrRef::component("Y")));
    }
}
