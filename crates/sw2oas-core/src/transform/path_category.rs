use std::fmt;

/// The domain bucket a concrete API path is filed under. Each category gets
/// its own path document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PathCategory {
    System,
    Streams,
    Search,
    Events,
    Users,
    Inputs,
    Dashboards,
    ArchivePlugin,
    SecurityPlugin,
    IlluminatePlugin,
    Integrations,
    DataWarehousePlugin,
    ForwarderPlugin,
    LicensePlugin,
    ReportsPlugin,
    SidecarPlugin,
    Administration,
}

impl PathCategory {
    pub const ALL: [PathCategory; 17] = [
        PathCategory::System,
        PathCategory::Streams,
        PathCategory::Search,
        PathCategory::Events,
        PathCategory::Users,
        PathCategory::Inputs,
        PathCategory::Dashboards,
        PathCategory::ArchivePlugin,
        PathCategory::SecurityPlugin,
        PathCategory::IlluminatePlugin,
        PathCategory::Integrations,
        PathCategory::DataWarehousePlugin,
        PathCategory::ForwarderPlugin,
        PathCategory::LicensePlugin,
        PathCategory::ReportsPlugin,
        PathCategory::SidecarPlugin,
        PathCategory::Administration,
    ];

    /// Flat tag attached to every operation in this category.
    pub fn tag_name(&self) -> &'static str {
        match self {
            PathCategory::System => "System",
            PathCategory::Streams => "Streams",
            PathCategory::Search => "Search",
            PathCategory::Events => "Events",
            PathCategory::Users => "Users",
            PathCategory::Inputs => "Inputs",
            PathCategory::Dashboards => "Dashboards",
            PathCategory::ArchivePlugin => "Archive Plugin",
            PathCategory::SecurityPlugin => "Security Plugin",
            PathCategory::IlluminatePlugin => "Illuminate Plugin",
            PathCategory::Integrations => "Integrations",
            PathCategory::DataWarehousePlugin => "Data Warehouse Plugin",
            PathCategory::ForwarderPlugin => "Forwarder Plugin",
            PathCategory::LicensePlugin => "License Plugin",
            PathCategory::ReportsPlugin => "Reports Plugin",
            PathCategory::SidecarPlugin => "Sidecar Plugin",
            PathCategory::Administration => "Administration",
        }
    }

    /// File stem of this category's path document.
    pub fn slug(&self) -> &'static str {
        match self {
            PathCategory::System => "system",
            PathCategory::Streams => "streams",
            PathCategory::Search => "search",
            PathCategory::Events => "events",
            PathCategory::Users => "users",
            PathCategory::Inputs => "inputs",
            PathCategory::Dashboards => "dashboards",
            PathCategory::ArchivePlugin => "plugin-archive",
            PathCategory::SecurityPlugin => "plugin-security",
            PathCategory::IlluminatePlugin => "plugin-illuminate",
            PathCategory::Integrations => "integrations",
            PathCategory::DataWarehousePlugin => "plugin-data-warehouse",
            PathCategory::ForwarderPlugin => "plugin-forwarder",
            PathCategory::LicensePlugin => "plugin-license",
            PathCategory::ReportsPlugin => "plugin-reports",
            PathCategory::SidecarPlugin => "plugin-sidecar",
            PathCategory::Administration => "administration",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            PathCategory::System => "Cluster and node management",
            PathCategory::Streams => "Stream routing and stream rules",
            PathCategory::Search => "Searches, saved searches and message retrieval",
            PathCategory::Events => "Event definitions, notifications and alerts",
            PathCategory::Users => "Users, roles and authorization",
            PathCategory::Inputs => "Message inputs",
            PathCategory::Dashboards => "Dashboards and views",
            PathCategory::ArchivePlugin => "Archiving",
            PathCategory::SecurityPlugin => "Security, investigations and teams",
            PathCategory::IlluminatePlugin => "Illuminate content bundles",
            PathCategory::Integrations => "Third-party integrations",
            PathCategory::DataWarehousePlugin => "Data warehouse",
            PathCategory::ForwarderPlugin => "Forwarders",
            PathCategory::LicensePlugin => "Licenses",
            PathCategory::ReportsPlugin => "Reports",
            PathCategory::SidecarPlugin => "Sidecar collectors",
            PathCategory::Administration => "Miscellaneous administration endpoints",
        }
    }
}

impl fmt::Display for PathCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag_name())
    }
}

/// Vendor names that mark an integration endpoint.
const INTEGRATION_KEYWORDS: &[&str] = &[
    "integrations",
    "aws",
    "azure",
    "gcp",
    "google",
    "o365",
    "office365",
    "okta",
    "crowdstrike",
    "sentinelone",
    "defender",
    "mimecast",
    "salesforce",
    "github",
    "gmail",
    "slack",
    "duo",
    "paloalto",
    "symantec",
    "armis",
];

type Rule = (fn(&str) -> bool, PathCategory);

/// Evaluated top to bottom; the first match wins. Later rules are often
/// substrings of paths an earlier rule is meant to claim, so order matters.
const RULES: &[Rule] = &[
    (
        |p| p.starts_with("/system/") || p.starts_with("/cluster/"),
        PathCategory::System,
    ),
    (|p| p.starts_with("/streams"), PathCategory::Streams),
    (
        |p| p.starts_with("/search") || p.starts_with("/views/search") || p.starts_with("/messages"),
        PathCategory::Search,
    ),
    (|p| p.starts_with("/events"), PathCategory::Events),
    (
        |p| p.starts_with("/users") || p.starts_with("/roles") || p.starts_with("/authz"),
        PathCategory::Users,
    ),
    (|p| p.starts_with("/inputs"), PathCategory::Inputs),
    (
        |p| p.starts_with("/dashboards") || (p.starts_with("/views") && !p.contains("search")),
        PathCategory::Dashboards,
    ),
    (|p| p.contains("archive"), PathCategory::ArchivePlugin),
    (
        |p| p.contains("security") || p.contains("investigations") || p.contains("teams"),
        PathCategory::SecurityPlugin,
    ),
    (
        |p| p.contains("illuminate") || p.contains("bundles"),
        PathCategory::IlluminatePlugin,
    ),
    (
        |p| INTEGRATION_KEYWORDS.iter().any(|k| p.contains(k)),
        PathCategory::Integrations,
    ),
    (
        |p| p.contains("datawarehouse") || p.contains("data_warehouse"),
        PathCategory::DataWarehousePlugin,
    ),
    (|p| p.contains("forwarder"), PathCategory::ForwarderPlugin),
    (|p| p.contains("license"), PathCategory::LicensePlugin),
    (|p| p.contains("report"), PathCategory::ReportsPlugin),
    (|p| p.starts_with("/sidecar"), PathCategory::SidecarPlugin),
];

/// Assign an API path to exactly one category.
pub fn categorize(path: &str) -> PathCategory {
    RULES
        .iter()
        .find(|(matches, _)| matches(path))
        .map(|(_, category)| *category)
        .unwrap_or(PathCategory::Administration)
}
