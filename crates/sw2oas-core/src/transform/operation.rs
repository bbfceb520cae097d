use indexmap::IndexMap;

use crate::oas::{HttpMethod, MediaType, Operation, Response, Schema, SchemaOrRef};
use crate::parse::descriptor::OperationDescriptor;

use super::model::convert_property;
use super::parameter::{JSON_MEDIA_TYPE, build_request_body, convert_parameter};
use super::path_category::PathCategory;
use super::type_mapper::map_type;

/// Codes that count as an explicit success declaration, in no particular order.
const SUCCESS_CODES: [&str; 4] = ["200", "201", "202", "204"];

const SUCCESS_DESCRIPTION: &str = "Successful response";

/// Convert one legacy operation declared on `path`.
pub fn convert_operation(
    method: HttpMethod,
    path: &str,
    op: &OperationDescriptor,
    tags: Vec<String>,
) -> Operation {
    let parameters = op
        .parameters
        .iter()
        .filter_map(convert_parameter)
        .collect();

    let request_body = op
        .parameters
        .iter()
        .find(|p| p.is_body())
        .map(build_request_body);

    let operation_id = match op.nickname.as_deref() {
        Some(nickname) if !nickname.is_empty() => nickname.to_string(),
        _ => synthesize_operation_id(method, path),
    };

    Operation {
        summary: op.summary.clone().unwrap_or_default(),
        operation_id,
        description: op.notes.clone().filter(|n| !n.is_empty()),
        tags,
        parameters,
        request_body,
        responses: build_responses(method, path, op),
    }
}

/// Flat domain tag first, then the hierarchical tag when it differs.
pub fn operation_tags(category: PathCategory, hierarchical: Option<&str>) -> Vec<String> {
    let flat = category.tag_name();
    let mut tags = vec![flat.to_string()];
    if let Some(tag) = hierarchical.filter(|t| *t != flat) {
        tags.push(tag.to_string());
    }
    tags
}

/// `method` + `path` with every non-alphanumeric character replaced by `_`.
///
/// No uniqueness check is made.
pub fn synthesize_operation_id(method: HttpMethod, path: &str) -> String {
    format!("{}{}", method.as_str().to_lowercase(), path)
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Pick the single success status code for an operation.
///
/// The first of 200/201/202/204 listed in the response messages wins;
/// without one the method decides.
pub fn infer_success_code(method: HttpMethod, path: &str, op: &OperationDescriptor) -> String {
    if let Some(explicit) = op
        .response_messages
        .iter()
        .map(|m| m.code.trim())
        .find(|code| SUCCESS_CODES.contains(code))
    {
        return explicit.to_string();
    }

    let code = match method {
        HttpMethod::Delete => "204",
        HttpMethod::Put if is_void(op) => "204",
        HttpMethod::Post if !path.contains('{') => "201",
        _ => "200",
    };
    code.to_string()
}

fn is_void(op: &OperationDescriptor) -> bool {
    op.response_type.as_deref() == Some("void")
}

/// Build the full response map: the success entry first, then every other
/// declared code in source order.
pub fn build_responses(
    method: HttpMethod,
    path: &str,
    op: &OperationDescriptor,
) -> IndexMap<String, Response> {
    let success = infer_success_code(method, path, op);

    let mut ok = Response::described(SUCCESS_DESCRIPTION);
    if success != "204" && !is_void(op) {
        let schema = response_schema(op);
        let produces = op
            .produces
            .clone()
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| vec![JSON_MEDIA_TYPE.to_string()]);
        ok.content = produces
            .into_iter()
            .map(|media| {
                (
                    media,
                    MediaType {
                        schema: schema.clone(),
                    },
                )
            })
            .collect();
    }

    let mut responses = IndexMap::new();
    responses.insert(success.clone(), ok);

    for message in &op.response_messages {
        let code = message.code.trim();
        if code == success {
            if let (Some(text), Some(entry)) = (&message.message, responses.get_mut(code)) {
                entry.description = text.clone();
            }
        } else {
            let description = message
                .message
                .clone()
                .unwrap_or_else(|| format!("Status {code}"));
            responses.insert(code.to_string(), Response::described(description));
        }
    }

    responses
}

fn response_schema(op: &OperationDescriptor) -> SchemaOrRef {
    match op.response_type.as_deref() {
        None | Some("any") => SchemaOrRef::inline(Schema::open_object()),
        Some("array") => SchemaOrRef::inline(Schema::array_of(
            op.items
                .as_ref()
                .map(convert_property)
                .unwrap_or_else(|| SchemaOrRef::inline(Schema::open_object())),
        )),
        Some(declared) => SchemaOrRef::component(map_type(declared).type_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn op(json: &str) -> OperationDescriptor {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_delete_defaults_to_204_without_content() {
        let o = op(r#"{"method": "DELETE", "type": "void"}"#);
        let responses = build_responses(HttpMethod::Delete, "/streams/{streamId}", &o);
        assert_eq!(responses.len(), 1);
        let ok = &responses["204"];
        assert_eq!(ok.description, SUCCESS_DESCRIPTION);
        assert!(ok.content.is_empty());
    }

    #[test]
    fn test_post_to_collection_is_201_with_content() {
        let o = op(r#"{"method": "POST", "type": "StreamCreatedResponse"}"#);
        let responses = build_responses(HttpMethod::Post, "/streams", &o);
        let created = &responses["201"];
        assert_eq!(
            created.content[JSON_MEDIA_TYPE].schema,
            SchemaOrRef::component("StreamCreatedResponse")
        );
    }

    #[test]
    fn test_post_void_has_no_content() {
        let o = op(r#"{"method": "POST", "type": "void"}"#);
        let responses = build_responses(HttpMethod::Post, "/streams", &o);
        assert!(responses["201"].content.is_empty());
    }

    #[test]
    fn test_post_to_item_is_200() {
        let o = op(r#"{"method": "POST"}"#);
        assert_eq!(infer_success_code(HttpMethod::Post, "/streams/{id}/pause", &o), "200");
    }

    #[test]
    fn test_put_void_is_204() {
        let void = op(r#"{"method": "PUT", "type": "void"}"#);
        let typed = op(r#"{"method": "PUT", "type": "Stream"}"#);
        assert_eq!(infer_success_code(HttpMethod::Put, "/streams/{id}", &void), "204");
        assert_eq!(infer_success_code(HttpMethod::Put, "/streams/{id}", &typed), "200");
    }

    #[test]
    fn test_explicit_code_beats_heuristic() {
        let o = op(r#"{
            "method": "GET",
            "type": "JobStatus",
            "responseMessages": [
                {"code": 404, "message": "Not found"},
                {"code": "202", "message": "Accepted"}
            ]
        }"#);
        let responses = build_responses(HttpMethod::Get, "/jobs/{id}", &o);
        let keys: Vec<&str> = responses.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["202", "404"]);
        assert_eq!(responses["202"].description, "Accepted");
        assert!(responses["202"].content.contains_key(JSON_MEDIA_TYPE));
        assert_eq!(responses["404"].description, "Not found");
        assert!(responses["404"].content.is_empty());
    }

    #[test]
    fn test_first_explicit_code_wins() {
        let o = op(r#"{
            "method": "POST",
            "responseMessages": [{"code": 200}, {"code": 201, "message": "Created"}]
        }"#);
        let responses = build_responses(HttpMethod::Post, "/streams", &o);
        assert_eq!(responses.first().map(|(k, _)| k.as_str()), Some("200"));
        assert_eq!(responses["200"].description, SUCCESS_DESCRIPTION);
        assert_eq!(responses["201"].description, "Created");
        assert!(responses["201"].content.is_empty());
    }

    #[test]
    fn test_produces_and_any() {
        let o = op(r#"{"method": "GET", "type": "any", "produces": ["text/csv", "application/json"]}"#);
        let responses = build_responses(HttpMethod::Get, "/export", &o);
        let ok = &responses["200"];
        assert_eq!(ok.content.len(), 2);
        assert_eq!(
            ok.content["text/csv"].schema,
            SchemaOrRef::inline(Schema::open_object())
        );
    }

    #[test]
    fn test_array_response() {
        let o = op(r#"{"method": "GET", "type": "array", "items": {"$ref": "Stream"}}"#);
        let responses = build_responses(HttpMethod::Get, "/streams", &o);
        assert_eq!(
            responses["200"].content[JSON_MEDIA_TYPE].schema,
            SchemaOrRef::inline(Schema::array_of(SchemaOrRef::component("Stream")))
        );
    }

    #[test]
    fn test_body_parameter_extraction() {
        let o = op(r#"{
            "method": "POST",
            "nickname": "create",
            "summary": "Create a stream",
            "parameters": [
                {"name": "JSON body", "paramType": "body", "type": "StreamDTO", "required": true},
                {"name": "pretty", "paramType": "query", "type": "boolean"}
            ]
        }"#);
        let converted = convert_operation(HttpMethod::Post, "/streams", &o, vec![]);
        let body = converted.request_body.expect("request body");
        assert!(body.required);
        assert_eq!(
            body.content[JSON_MEDIA_TYPE].schema,
            SchemaOrRef::component("StreamDTO")
        );
        assert_eq!(converted.parameters.len(), 1);
        assert_eq!(converted.parameters[0].name, "pretty");
        assert_eq!(converted.operation_id, "create");
        assert_eq!(converted.summary, "Create a stream");
    }

    #[test]
    fn test_synthesized_operation_id() {
        let o = op(r#"{"method": "GET", "nickname": ""}"#);
        let converted = convert_operation(HttpMethod::Get, "/system/inputs/{id}", &o, vec![]);
        assert_eq!(converted.operation_id, "get_system_inputs__id_");
        assert!(converted.description.is_none());
    }

    #[test]
    fn test_operation_tags() {
        assert_eq!(
            operation_tags(PathCategory::System, Some("System/Inputs")),
            vec!["System", "System/Inputs"]
        );
        assert_eq!(
            operation_tags(PathCategory::Streams, Some("Streams")),
            vec!["Streams"]
        );
        assert_eq!(operation_tags(PathCategory::Administration, None), vec!["Administration"]);
    }
}
