//! Route table.

/// Named paths the stores navigate to.
pub mod paths {
    pub const LOGIN: &str = "/login";
    pub const REGISTER: &str = "/register";
    pub const DASHBOARD: &str = "/";
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteName {
    Login,
    Register,
    Dashboard,
    Hosts,
    Scans,
    Collections,
    Platforms,
    Applications,
    ApplicationDetail { id: String },
    Tags,
    Settings,
    NotFound,
}

impl RouteName {
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteName::Login => "Login",
            RouteName::Register => "Register",
            RouteName::Dashboard => "Dashboard",
            RouteName::Hosts => "Hosts",
            RouteName::Scans => "Scans",
            RouteName::Collections => "Collections",
            RouteName::Platforms => "Platforms",
            RouteName::Applications => "Applications",
            RouteName::ApplicationDetail { .. } => "ApplicationDetail",
            RouteName::Tags => "Tags",
            RouteName::Settings => "Settings",
            RouteName::NotFound => "NotFound",
        }
    }
}

/// A path resolved against the route table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub path: String,
    pub name: RouteName,
    pub requires_auth: bool,
}

impl Route {
    pub fn is_login_or_register(&self) -> bool {
        matches!(self.name, RouteName::Login | RouteName::Register)
    }
}

/// Children of `/`, all behind authentication.
const PROTECTED: &[(&str, RouteName)] = &[
    ("", RouteName::Dashboard),
    ("hosts", RouteName::Hosts),
    ("scans", RouteName::Scans),
    ("collections", RouteName::Collections),
    ("platforms", RouteName::Platforms),
    ("applications", RouteName::Applications),
    ("tags", RouteName::Tags),
    ("settings", RouteName::Settings),
];

/// Match `path` against the table. Query strings and trailing slashes are ignored.
pub fn resolve(path: &str) -> Route {
    let clean = path.split(['?', '#']).next().unwrap_or("");
    let trimmed = clean.trim_matches('/');
    let normalized = format!("/{}", trimmed);

    let (name, requires_auth) = match trimmed {
        "login" => (RouteName::Login, false),
        "register" => (RouteName::Register, false),
        _ => match PROTECTED.iter().find(|(p, _)| *p == trimmed) {
            Some((_, name)) => (name.clone(), true),
            None => match trimmed.strip_prefix("applications/") {
                Some(id) if !id.is_empty() && !id.contains('/') => (
                    RouteName::ApplicationDetail { id: id.to_string() },
                    true,
                ),
                _ => (RouteName::NotFound, false),
            },
        },
    };

    Route {
        path: normalized,
        name,
        requires_auth,
    }
}
