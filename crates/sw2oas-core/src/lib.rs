pub mod assemble;
pub mod config;
pub mod error;
pub mod oas;
pub mod parse;
pub mod transform;

pub use assemble::DocumentGraph;

/// A generated file with path and content.
#[derive(Debug, Clone)]
pub struct GeneratedFile {
    pub path: String,
    pub content: String,
}
