pub mod convert;
pub mod model;
pub mod operation;
pub mod parameter;
pub mod path_category;
pub mod ref_repair;
pub mod schema_kind;
pub mod tag_hierarchy;
pub mod type_mapper;

pub use convert::{Conversion, convert_descriptors};
pub use path_category::{PathCategory, categorize};
pub use schema_kind::{SchemaKind, classify};

use log::info;

use crate::assemble::{DocumentGraph, assemble};
use crate::config::DocumentConfig;
use crate::error::ConvertError;
use crate::parse::descriptor::DescriptorDocument;

/// Convert descriptor documents into the split OpenAPI document graph.
///
/// Folds every descriptor in order, assembles the root and sub-documents,
/// then repairs references to primitive type names.
pub fn transform(
    docs: &[DescriptorDocument],
    config: &DocumentConfig,
) -> Result<DocumentGraph, ConvertError> {
    let conversion = convert_descriptors(docs)?;
    info!(
        "converted {} descriptors: {} operations, {} schemas",
        docs.len(),
        conversion.operation_count(),
        conversion.schemas.len()
    );

    let mut graph = assemble(&conversion, config);
    let repaired = graph.repair_references();
    if repaired > 0 {
        info!("inlined {repaired} references to primitive types");
    }
    Ok(graph)
}
