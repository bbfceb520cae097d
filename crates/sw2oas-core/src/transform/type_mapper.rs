/// Target primitive names. A reference to any of these is never a model.
pub const PRIMITIVE_TYPES: [&str; 7] = [
    "string", "integer", "number", "boolean", "array", "object", "any",
];

/// A legacy primitive translated into the target vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MappedType<'a> {
    pub type_name: &'a str,
    /// Format implied by the legacy name, e.g. `long` implies `int64`.
    pub format: Option<&'static str>,
}

/// Map a legacy primitive type name to a target type name.
///
/// Names outside the table pass through unchanged; that covers both
/// already-canonical primitives and model names.
pub fn map_type(legacy: &str) -> MappedType<'_> {
    let (type_name, format) = match legacy {
        "int" | "int32" => ("integer", Some("int32")),
        "long" | "int64" => ("integer", Some("int64")),
        "float" => ("number", Some("float")),
        "double" => ("number", Some("double")),
        "byte" => ("string", Some("byte")),
        "binary" => ("string", Some("binary")),
        "date" => ("string", Some("date")),
        "date-time" | "DateTime" => ("string", Some("date-time")),
        "password" => ("string", Some("password")),
        other => return MappedType {
            type_name: other,
            format: None,
        },
    };
    MappedType { type_name, format }
}

pub fn is_primitive(name: &str) -> bool {
    PRIMITIVE_TYPES.contains(&name)
}
