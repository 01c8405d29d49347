//! Route table and the authentication guard in front of it.

pub mod guard;
pub mod routes;

pub use guard::{NavigationOutcome, Router};
pub use routes::{paths, resolve, Route, RouteName};
