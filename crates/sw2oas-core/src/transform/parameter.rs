use indexmap::IndexMap;
use log::warn;

use crate::oas::{MediaType, Parameter, ParameterLocation, RequestBody, Schema, SchemaOrRef};
use crate::parse::descriptor::{ParamType, ParameterDescriptor};

use super::model::{convert_property, schema_for_type_name};
use super::type_mapper::map_type;

pub const JSON_MEDIA_TYPE: &str = "application/json";

/// Convert a non-body parameter. Returns `None` for body parameters, which
/// become a request body via [`build_request_body`] instead.
pub fn convert_parameter(param: &ParameterDescriptor) -> Option<Parameter> {
    let location = match &param.param_type {
        Some(ParamType::Body) => return None,
        Some(ParamType::Path) => ParameterLocation::Path,
        Some(ParamType::Query) => ParameterLocation::Query,
        Some(ParamType::Header) => ParameterLocation::Header,
        Some(ParamType::Other(other)) => {
            warn!(
                "parameter '{}' has unknown paramType '{}', treating it as query",
                param.name, other
            );
            ParameterLocation::Query
        }
        None => {
            warn!("parameter '{}' has no paramType, treating it as query", param.name);
            ParameterLocation::Query
        }
    };

    Some(Parameter {
        name: param.name.clone(),
        location,
        description: param.description.clone(),
        required: param.required.unwrap_or(false),
        schema: parameter_schema(param),
    })
}

fn parameter_schema(param: &ParameterDescriptor) -> SchemaOrRef {
    let type_name = param.type_name.as_deref().unwrap_or("string");

    if type_name == "array" {
        let items = param
            .items
            .as_ref()
            .map(convert_property)
            .unwrap_or_else(|| SchemaOrRef::inline(Schema::of_type("string")));
        return SchemaOrRef::inline(Schema::array_of(with_constraints(items, param)));
    }

    let element = with_constraints(schema_for_type_name(type_name), param);
    if param.allow_multiple {
        SchemaOrRef::inline(Schema::array_of(element))
    } else {
        element
    }
}

/// Carry `defaultValue` and `enum` onto an inline schema.
fn with_constraints(schema: SchemaOrRef, param: &ParameterDescriptor) -> SchemaOrRef {
    match schema {
        SchemaOrRef::Schema(mut inner) => {
            if param.default_value.is_some() {
                inner.default_value = param.default_value.clone();
            }
            if let Some(values) = &param.enum_values {
                inner.enum_values = values.clone();
            }
            SchemaOrRef::Schema(inner)
        }
        reference => reference,
    }
}

/// Build the request body for a body parameter.
///
/// The schema references the declared type; `any` or a missing type yields an
/// open object.
pub fn build_request_body(param: &ParameterDescriptor) -> RequestBody {
    let schema = match param.type_name.as_deref() {
        None | Some("any") => SchemaOrRef::inline(Schema::open_object()),
        Some(declared) => SchemaOrRef::component(map_type(declared).type_name),
    };

    let mut content = IndexMap::new();
    content.insert(JSON_MEDIA_TYPE.to_string(), MediaType { schema });

    RequestBody {
        description: param.description.clone(),
        content,
        required: param.required.unwrap_or(false),
    }
}
