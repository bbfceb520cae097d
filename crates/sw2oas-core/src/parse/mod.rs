pub mod descriptor;
pub mod model;

use crate::error::ParseError;
use descriptor::DescriptorDocument;

/// Parse descriptor documents from JSON: a single descriptor object or an
/// array of them.
pub fn from_json(input: &str) -> Result<Vec<DescriptorDocument>, ParseError> {
    // Deserialize straight into the expected shape so errors keep their position
    if input.trim_start().starts_with('[') {
        Ok(serde_json::from_str(input)?)
    } else {
        Ok(vec![serde_json::from_str(input)?])
    }
}

/// Parse descriptor documents from YAML.
pub fn from_yaml(input: &str) -> Result<Vec<DescriptorDocument>, ParseError> {
    let value: serde_yaml_ng::Value = serde_yaml_ng::from_str(input)?;
    if value.is_sequence() {
        Ok(serde_yaml_ng::from_value(value)?)
    } else {
        Ok(vec![serde_yaml_ng::from_value(value)?])
    }
}

/// Parse several JSON inputs, concatenated in the order given.
pub fn from_json_documents<'a, I>(inputs: I) -> Result<Vec<DescriptorDocument>, ParseError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut out = Vec::new();
    for input in inputs {
        out.extend(from_json(input)?);
    }
    Ok(out)
}
