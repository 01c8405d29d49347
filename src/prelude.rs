//! Commonly used types in one import.
//!
//! ```ignore
//! use prophet::prelude::*;
//! ```

pub use crate::api::ApiClient;
pub use crate::config::ClientConfig;
pub use crate::error::{ApiError, AuthError, ErrorContext, ProphetError, ProphetResult, ResultExt};
pub use crate::models::{
    Application, ApplicationGraph, GraphEdge, GraphNode, GraphPayload, Host, HostFilter, NodeId,
    NodeType, Page, User,
};
pub use crate::router::{NavigationOutcome, Router};
pub use crate::state::{AuthPhase, AuthStore, LocaleStore, SessionToken, SettingsStore};
pub use crate::traits::{HttpClient, Storage};
