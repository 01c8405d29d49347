//! Navigation guard.

use tracing::debug;

use super::routes::{paths, resolve, Route};
use crate::state::AuthStore;

/// What the guard decided for one navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    Proceed(Route),
    Redirect { from: String, to: Route },
}

impl NavigationOutcome {
    /// The route the user lands on.
    pub fn route(&self) -> &Route {
        match self {
            NavigationOutcome::Proceed(route) => route,
            NavigationOutcome::Redirect { to, .. } => to,
        }
    }
}

/// Runs the auth check before every navigation and records the result.
pub struct Router<'a> {
    auth: &'a AuthStore,
}

impl<'a> Router<'a> {
    pub fn new(auth: &'a AuthStore) -> Self {
        Self { auth }
    }

    /// Decide where a navigation to `path` ends up.
    ///
    /// A held token whose user is not loaded yet is resolved first, so a
    /// stale token sends the user to login on this very navigation.
    pub async fn navigate(&self, path: &str) -> NavigationOutcome {
        if self.auth.token().is_some() && self.auth.user().is_none() && !self.auth.is_loading() {
            // Failure already resets the session; the check below sees it.
            let _ = self.auth.fetch_current_user().await;
        }

        let target = resolve(path);
        let authenticated = self.auth.is_authenticated();

        let outcome = if target.requires_auth && !authenticated {
            NavigationOutcome::Redirect {
                from: target.path,
                to: resolve(paths::LOGIN),
            }
        } else if target.is_login_or_register() && authenticated {
            NavigationOutcome::Redirect {
                from: target.path,
                to: resolve(paths::DASHBOARD),
            }
        } else {
            NavigationOutcome::Proceed(target)
        };

        let history = self.auth.history();
        match &outcome {
            NavigationOutcome::Proceed(route) => history.push(route.path.clone()),
            NavigationOutcome::Redirect { from, to } => {
                debug!(from = %from, to = %to.path, "navigation redirected");
                history.push_redirect(from.clone(), to.path.clone());
            }
        }
        outcome
    }
}
