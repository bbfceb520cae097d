use log::debug;

use crate::oas::{AdditionalProperties, Operation, PathItem, Schema, SchemaOrRef};

use super::type_mapper::is_primitive;

/// Rewrite a reference that targets a primitive type name into an inline
/// `type: <name>` schema, recursing through nested schemas.
///
/// Returns the number of references rewritten. Running it again over the
/// result rewrites nothing.
pub fn repair_schema(schema: &mut SchemaOrRef) -> usize {
    match schema {
        SchemaOrRef::Ref {
            ref_path,
            description,
        } => {
            let Some(target) = ref_path
                .rsplit('/')
                .next()
                .filter(|t| is_primitive(t))
                .map(str::to_string)
            else {
                return 0;
            };
            debug!("rewriting primitive reference to '{target}' as an inline type");
            let mut inline = Schema::of_type(&target);
            inline.description = description.take();
            *schema = SchemaOrRef::inline(inline);
            1
        }
        SchemaOrRef::Schema(inner) => repair_schema_object(inner),
    }
}

/// Repair every reference nested inside an inline schema.
pub fn repair_schema_object(schema: &mut Schema) -> usize {
    let mut repaired = 0;
    for property in schema.properties.values_mut() {
        repaired += repair_schema(property);
    }
    if let Some(items) = schema.items.as_deref_mut() {
        repaired += repair_schema(items);
    }
    if let Some(AdditionalProperties::Schema(value)) = schema.additional_properties.as_mut() {
        repaired += repair_schema(value);
    }
    repaired
}

pub fn repair_operation(op: &mut Operation) -> usize {
    let mut repaired = 0;
    for param in &mut op.parameters {
        repaired += repair_schema(&mut param.schema);
    }
    if let Some(body) = op.request_body.as_mut() {
        for media in body.content.values_mut() {
            repaired += repair_schema(&mut media.schema);
        }
    }
    for response in op.responses.values_mut() {
        for media in response.content.values_mut() {
            repaired += repair_schema(&mut media.schema);
        }
    }
    repaired
}

pub fn repair_path_item(item: &mut PathItem) -> usize {
    item.operations_mut().map(repair_operation).sum()
}
