use std::collections::BTreeSet;

use heck::ToUpperCamelCase;
use indexmap::IndexMap;

use crate::oas::{Tag, TagGroup};

/// Whole-word, case-insensitive replacements applied to display names.
const ACRONYMS: &[(&str, &str)] = &[
    ("api", "API"),
    ("authz", "AuthZ"),
    ("aws", "AWS"),
    ("cef", "CEF"),
    ("csv", "CSV"),
    ("gcp", "GCP"),
    ("gelf", "GELF"),
    ("http", "HTTP"),
    ("https", "HTTPS"),
    ("id", "ID"),
    ("ids", "IDs"),
    ("ip", "IP"),
    ("json", "JSON"),
    ("ldap", "LDAP"),
    ("mfa", "MFA"),
    ("mongodb", "MongoDB"),
    ("o365", "O365"),
    ("oidc", "OIDC"),
    ("okta", "Okta"),
    ("opensearch", "OpenSearch"),
    ("saml", "SAML"),
    ("sso", "SSO"),
    ("ssl", "SSL"),
    ("tls", "TLS"),
    ("ui", "UI"),
    ("uri", "URI"),
    ("url", "URL"),
];

fn is_param_segment(segment: &str) -> bool {
    segment.starts_with('{') && segment.ends_with('}')
}

fn is_all_caps(segment: &str) -> bool {
    segment.chars().any(|c| c.is_alphabetic())
        && segment.chars().all(|c| !c.is_lowercase())
}

/// Title-case one resource path segment.
///
/// Dotted (package-like) segments, `{param}` segments and all-caps segments
/// are kept verbatim; everything else is split on `-`/`_` and each word is
/// capitalized.
pub fn titleize(segment: &str) -> String {
    if segment.contains('.') || is_param_segment(segment) || is_all_caps(segment) {
        return segment.to_string();
    }
    segment
        .split(['-', '_'])
        .filter(|w| !w.is_empty())
        .map(|w| w.to_upper_camel_case())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Derive the hierarchical tag for a resource path, e.g. `/system/inputs`
/// becomes `System/Inputs`. Returns `None` for an empty path.
pub fn hierarchical_tag(resource_path: &str) -> Option<String> {
    let segments: Vec<String> = resource_path
        .split('/')
        .filter(|s| !s.is_empty())
        .map(titleize)
        .collect();
    if segments.is_empty() {
        None
    } else {
        Some(segments.join("/"))
    }
}

/// The group a hierarchical tag belongs to: its first segment.
pub fn top_level_group(tag: &str) -> &str {
    tag.split('/').next().unwrap_or(tag)
}

/// Human-facing name for a tag.
///
/// `Streams/{streamId}/Rules` reads `Streams / Rules by streamId`, and a
/// dotted segment shows only its last component.
pub fn display_name(tag: &str) -> String {
    let mut parts = Vec::new();
    let mut params = Vec::new();

    for segment in tag.split('/').filter(|s| !s.is_empty()) {
        if is_param_segment(segment) {
            params.push(&segment[1..segment.len() - 1]);
        } else if let Some((_, last)) = segment.rsplit_once('.') {
            parts.push(titleize(last));
        } else {
            parts.push(segment.to_string());
        }
    }

    let mut name = normalize_acronyms(&parts.join(" / "));
    for (i, param) in params.iter().enumerate() {
        name.push_str(if i == 0 { " by " } else { " and by " });
        name.push_str(param);
    }
    name
}

/// Replace whole words found in the acronym table, ignoring case.
pub fn normalize_acronyms(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut word = String::new();

    let flush = |word: &mut String, out: &mut String| {
        if word.is_empty() {
            return;
        }
        let lower = word.to_lowercase();
        match ACRONYMS.iter().find(|(from, _)| *from == lower) {
            Some((_, to)) => out.push_str(to),
            None => out.push_str(word),
        }
        word.clear();
    };

    for ch in text.chars() {
        if ch.is_alphanumeric() {
            word.push(ch);
        } else {
            flush(&mut word, &mut out);
            out.push(ch);
        }
    }
    flush(&mut word, &mut out);
    out
}

/// Every tag seen during a conversion run, plus the groups they fall into.
#[derive(Debug, Clone, Default)]
pub struct TagRegistry {
    tags: IndexMap<String, Tag>,
    groups: IndexMap<String, BTreeSet<String>>,
}

impl TagRegistry {
    /// Record a tag. The first non-empty description seen is kept.
    pub fn register(&mut self, name: &str, description: Option<&str>) {
        let description = description.filter(|d| !d.is_empty());
        let tag = self.tags.entry(name.to_string()).or_insert_with(|| Tag {
            name: name.to_string(),
            description: None,
            display_name: display_name(name),
        });
        if tag.description.is_none() {
            tag.description = description.map(str::to_string);
        }

        let group = top_level_group(name);
        self.groups
            .entry(group.to_string())
            .or_insert_with(|| BTreeSet::from([group.to_string()]))
            .insert(name.to_string());
    }

    /// Tags sorted by name, and groups sorted by name with sorted members.
    ///
    /// Group names that were never used as a tag themselves still get a tag
    /// entry so every group member is declared.
    pub fn finish(&self) -> (Vec<Tag>, Vec<TagGroup>) {
        let mut tags = self.tags.clone();
        for group in self.groups.keys() {
            if !tags.contains_key(group) {
                tags.insert(
                    group.clone(),
                    Tag {
                        name: group.clone(),
                        description: None,
                        display_name: display_name(group),
                    },
                );
            }
        }
        tags.sort_keys();

        let mut groups: Vec<TagGroup> = self
            .groups
            .iter()
            .map(|(name, members)| TagGroup {
                name: name.clone(),
                tags: members.iter().cloned().collect(),
            })
            .collect();
        groups.sort_by(|a, b| a.name.cmp(&b.name));

        (tags.into_values().collect(), groups)
    }
}
