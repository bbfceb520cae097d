use std::collections::BTreeMap;

use indexmap::IndexMap;
use log::{debug, warn};

use crate::error::ConvertError;
use crate::oas::{HttpMethod, PathItem, Schema};
use crate::parse::descriptor::DescriptorDocument;

use super::model::convert_model;
use super::operation::{convert_operation, operation_tags};
use super::path_category::{PathCategory, categorize};
use super::tag_hierarchy::{TagRegistry, hierarchical_tag};

/// Accumulated output of folding descriptor documents, before assembly.
#[derive(Debug, Clone, Default)]
pub struct Conversion {
    /// Category, then path, then method. Later operations overwrite earlier ones.
    pub paths: BTreeMap<PathCategory, IndexMap<String, PathItem>>,
    /// Merged models across all descriptors, last write wins.
    pub schemas: IndexMap<String, Schema>,
    pub tags: TagRegistry,
}

impl Conversion {
    /// Fold one descriptor document into the accumulator.
    pub fn absorb(mut self, doc: &DescriptorDocument) -> Result<Self, ConvertError> {
        for (name, model) in &doc.models {
            if self.schemas.insert(name.clone(), convert_model(model)).is_some() {
                debug!(
                    "model '{}' from '{}' replaces an earlier definition",
                    name, doc.resource_path
                );
            }
        }

        let hierarchical = hierarchical_tag(&doc.resource_path);

        for (index, api) in doc.apis.iter().enumerate() {
            let path = api.path.as_deref().ok_or_else(|| ConvertError::MissingPath {
                resource_path: doc.resource_path.clone(),
                index,
            })?;

            let category = categorize(path);
            let tags = operation_tags(category, hierarchical.as_deref());

            for op in &api.operations {
                let Some(method) = HttpMethod::parse(&op.method) else {
                    warn!("skipping {} {}: unsupported method", op.method, path);
                    continue;
                };

                self.tags
                    .register(category.tag_name(), Some(category.description()));
                for tag in tags.iter().skip(1) {
                    self.tags.register(tag, doc.description.as_deref());
                }

                let converted = convert_operation(method, path, op, tags.clone());
                let item = self
                    .paths
                    .entry(category)
                    .or_default()
                    .entry(path.to_string())
                    .or_default();
                if item.set(method, converted).is_some() {
                    debug!("{} {} redefined, keeping the later one", method.as_str(), path);
                }
            }
        }

        Ok(self)
    }

    pub fn operation_count(&self) -> usize {
        self.paths
            .values()
            .flat_map(|paths| paths.values())
            .map(|item| item.operations().count())
            .sum()
    }
}

/// Fold every descriptor, in order, into one [`Conversion`].
pub fn convert_descriptors(docs: &[DescriptorDocument]) -> Result<Conversion, ConvertError> {
    docs.iter().try_fold(Conversion::default(), Conversion::absorb)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConvertError;
    use crate::parse;

    #[test]
    fn test_missing_path_is_fatal() {
        let docs = parse::from_json(
            r#"[
                {"resourcePath": "/streams", "apis": [{"path": "/streams", "operations": []}]},
                {"resourcePath": "/system/inputs", "apis": [{"operations": [{"method": "GET"}]}]}
            ]"#,
        )
        .unwrap();
        match convert_descriptors(&docs) {
            Err(ConvertError::MissingPath {
                resource_path,
                index,
            }) => {
                assert_eq!(resource_path, "/system/inputs");
                assert_eq!(index, 0);
            }
            other => panic!("expected MissingPath, got {other:?}"),
        }
    }

    #[test]
    fn test_later_operation_overwrites_earlier() {
        let docs = parse::from_json(
            r#"[
                {"resourcePath": "/streams", "apis": [
                    {"path": "/streams", "operations": [{"method": "GET", "nickname": "first"}]}
                ]},
                {"resourcePath": "/streams", "apis": [
                    {"path": "/streams", "operations": [{"method": "get", "nickname": "second"}]}
                ]}
            ]"#,
        )
        .unwrap();
        let conversion = convert_descriptors(&docs).unwrap();
        let item = &conversion.paths[&PathCategory::Streams]["/streams"];
        assert_eq!(
            item.operation(HttpMethod::Get).map(|op| op.operation_id.as_str()),
            Some("second")
        );
        assert_eq!(conversion.operation_count(), 1);
    }

    #[test]
    fn test_duplicate_models_last_write_wins() {
        let docs = parse::from_json(
            r#"[
                {"resourcePath": "/a", "models": {"Shared": {"description": "first"}, "OnlyA": {}}},
                {"resourcePath": "/b", "models": {"Shared": {"description": "second"}}}
            ]"#,
        )
        .unwrap();
        let conversion = convert_descriptors(&docs).unwrap();
        assert_eq!(conversion.schemas.len(), 2);
        assert_eq!(
            conversion.schemas["Shared"].description.as_deref(),
            Some("second")
        );
    }

    #[test]
    fn test_unsupported_method_is_skipped() {
        let docs = parse::from_json(
            r#"{"resourcePath": "/streams", "apis": [
                {"path": "/streams", "operations": [{"method": "TRACE"}, {"method": "POST"}]}
            ]}"#,
        )
        .unwrap();
        let conversion = convert_descriptors(&docs).unwrap();
        assert_eq!(conversion.operation_count(), 1);
    }
}
