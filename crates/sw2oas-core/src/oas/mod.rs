//! OpenAPI 3.0 document model produced by the converter.

pub mod components;
pub mod media_type;
pub mod operation;
pub mod parameter;
pub mod request_body;
pub mod response;
pub mod schema;
pub mod security;
pub mod server;
pub mod spec;

pub use components::Components;
pub use media_type::MediaType;
pub use operation::{HttpMethod, Operation, PathItem, Reference};
pub use parameter::{Parameter, ParameterLocation};
pub use request_body::RequestBody;
pub use response::Response;
pub use schema::{AdditionalProperties, COMPONENTS_SCHEMAS, Schema, SchemaOrRef};
pub use security::{SecurityRequirement, SecurityScheme};
pub use server::Server;
pub use spec::{Contact, Info, License, Logo, OpenApiSpec, Tag, TagGroup};

/// OpenAPI version written into the root document.
pub const OPENAPI_VERSION: &str = "3.0.3";
