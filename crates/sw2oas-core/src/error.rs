use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("api entry #{index} of resource '{resource_path}' has no path")]
    MissingPath { resource_path: String, index: usize },
}

#[derive(Debug, Error)]
pub enum EmitError {
    #[error("failed to serialize {file}: {source}")]
    Yaml {
        file: String,
        #[source]
        source: serde_yaml_ng::Error,
    },
}
