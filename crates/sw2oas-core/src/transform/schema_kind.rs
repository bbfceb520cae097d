use std::fmt;

/// Which schema document a component schema is written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaKind {
    Core,
    Plugin,
    Common,
}

impl SchemaKind {
    pub const ALL: [SchemaKind; 3] = [SchemaKind::Core, SchemaKind::Plugin, SchemaKind::Common];

    pub fn slug(&self) -> &'static str {
        match self {
            SchemaKind::Core => "core",
            SchemaKind::Plugin => "plugin",
            SchemaKind::Common => "common",
        }
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

const COMMON_NAMES: [&str; 3] = ["Object", "anyMap", "integerMap"];

/// Bucket a model by name alone.
pub fn classify(name: &str) -> SchemaKind {
    if name.contains("plugin") || name.contains("Plugin") {
        SchemaKind::Plugin
    } else if name.contains("Response") || name.contains("Request") || COMMON_NAMES.contains(&name)
    {
        SchemaKind::Common
    } else {
        SchemaKind::Core
    }
}
