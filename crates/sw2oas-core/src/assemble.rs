//! Splits a [`Conversion`] into the root document plus per-category path
//! documents and per-kind schema documents.

use indexmap::IndexMap;
use serde::Serialize;

use crate::GeneratedFile;
use crate::config::DocumentConfig;
use crate::error::EmitError;
use crate::oas::{
    Components, OPENAPI_VERSION, OpenApiSpec, PathItem, Reference, Schema, SchemaOrRef,
    SecurityRequirement, SecurityScheme, Server,
};
use crate::transform::convert::Conversion;
use crate::transform::path_category::PathCategory;
use crate::transform::ref_repair::{repair_path_item, repair_schema, repair_schema_object};
use crate::transform::schema_kind::{SchemaKind, classify};

const BASIC_AUTH: &str = "basicAuth";

/// All path definitions of one category.
#[derive(Debug, Clone, PartialEq)]
pub struct PathDocument {
    pub category: PathCategory,
    /// Location relative to the root document.
    pub file: String,
    pub paths: IndexMap<String, PathItem>,
}

/// All schema definitions of one kind.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaDocument {
    pub kind: SchemaKind,
    pub file: String,
    pub schemas: IndexMap<String, Schema>,
}

/// The root document and every document it points into.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentGraph {
    pub root_file: String,
    pub root: OpenApiSpec,
    pub path_documents: Vec<PathDocument>,
    pub schema_documents: Vec<SchemaDocument>,
}

/// Escape one JSON pointer reference token: `~` to `~0`, then `/` to `~1`.
pub fn escape_pointer_token(token: &str) -> String {
    token.replace('~', "~0").replace('/', "~1")
}

fn indirection(file: &str, token: &str) -> String {
    format!("{file}#/{}", escape_pointer_token(token))
}

/// Build the document graph. References are not repaired here; see
/// [`DocumentGraph::repair_references`].
pub fn assemble(conversion: &Conversion, config: &DocumentConfig) -> DocumentGraph {
    let layout = &config.layout;

    let path_documents: Vec<PathDocument> = conversion
        .paths
        .iter()
        .filter(|(_, paths)| !paths.is_empty())
        .map(|(category, paths)| PathDocument {
            category: *category,
            file: format!("{}/{}.yaml", layout.paths_dir, category.slug()),
            paths: paths.clone(),
        })
        .collect();

    let mut schema_documents: Vec<SchemaDocument> = SchemaKind::ALL
        .iter()
        .map(|kind| SchemaDocument {
            kind: *kind,
            file: format!("{}/{}.yaml", layout.schemas_dir, kind.slug()),
            schemas: IndexMap::new(),
        })
        .collect();
    for (name, schema) in &conversion.schemas {
        let kind = classify(name);
        if let Some(doc) = schema_documents.iter_mut().find(|d| d.kind == kind) {
            doc.schemas.insert(name.clone(), schema.clone());
        }
    }

    let paths = path_documents
        .iter()
        .flat_map(|doc| {
            doc.paths.keys().map(move |path| {
                (
                    path.clone(),
                    Reference {
                        ref_path: indirection(&doc.file, path),
                    },
                )
            })
        })
        .collect();

    let mut components = Components::default();
    for doc in &schema_documents {
        for name in doc.schemas.keys() {
            components.schemas.insert(
                name.clone(),
                SchemaOrRef::Ref {
                    ref_path: indirection(&doc.file, name),
                    description: None,
                },
            );
        }
    }

    let mut security = Vec::new();
    if config.security.basic_auth {
        components.security_schemes.insert(
            BASIC_AUTH.to_string(),
            SecurityScheme::http_basic(Some("Username and password, or an access token".to_string())),
        );
        let mut requirement = SecurityRequirement::new();
        requirement.insert(BASIC_AUTH.to_string(), Vec::new());
        security.push(requirement);
    }

    let (tags, tag_groups) = conversion.tags.finish();

    let root = OpenApiSpec {
        openapi: OPENAPI_VERSION.to_string(),
        info: config.info.to_info(),
        servers: config
            .info
            .server_url
            .iter()
            .map(|url| Server {
                url: url.clone(),
                description: None,
            })
            .collect(),
        security,
        tags,
        tag_groups,
        paths,
        components: Some(components),
    };

    DocumentGraph {
        root_file: layout.root_file.clone(),
        root,
        path_documents,
        schema_documents,
    }
}

impl DocumentGraph {
    /// Rewrite references to primitive type names into inline types across
    /// every document. Returns how many were rewritten.
    pub fn repair_references(&mut self) -> usize {
        let mut repaired = 0;
        if let Some(components) = self.root.components.as_mut() {
            for schema in components.schemas.values_mut() {
                repaired += repair_schema(schema);
            }
        }
        for doc in &mut self.path_documents {
            for item in doc.paths.values_mut() {
                repaired += repair_path_item(item);
            }
        }
        for doc in &mut self.schema_documents {
            for schema in doc.schemas.values_mut() {
                repaired += repair_schema_object(schema);
            }
        }
        repaired
    }

    /// Names of every schema across the schema documents.
    pub fn schema_names(&self) -> impl Iterator<Item = &str> {
        self.schema_documents
            .iter()
            .flat_map(|doc| doc.schemas.keys().map(String::as_str))
    }

    /// Serialize every document to YAML, root first.
    pub fn to_files(&self) -> Result<Vec<GeneratedFile>, EmitError> {
        let mut files = vec![emit(&self.root_file, &self.root)?];
        for doc in &self.path_documents {
            files.push(emit(&doc.file, &doc.paths)?);
        }
        for doc in &self.schema_documents {
            files.push(emit(&doc.file, &doc.schemas)?);
        }
        Ok(files)
    }
}

fn emit<T: Serialize>(file: &str, value: &T) -> Result<GeneratedFile, EmitError> {
    let content = serde_yaml_ng::to_string(value).map_err(|source| EmitError::Yaml {
        file: file.to_string(),
        source,
    })?;
    Ok(GeneratedFile {
        path: file.to_string(),
        content,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_pointer_token() {
        assert_eq!(escape_pointer_token("/streams/{id}"), "~1streams~1{id}");
        assert_eq!(escape_pointer_token("/a~b"), "~1a~0b");
        // `~` is escaped first so `~1` in the input survives as a literal
        assert_eq!(escape_pointer_token("~1"), "~01");
    }

    #[test]
    fn test_indirection() {
        assert_eq!(
            indirection("paths/system.yaml", "/system/inputs"),
            "paths/system.yaml#/~1system~1inputs"
        );
        assert_eq!(indirection("schemas/core.yaml", "Stream"), "schemas/core.yaml#/Stream");
    }
}
