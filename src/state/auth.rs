//! Session state machine.
//!
//! ```text
//!   Anonymous --login--> Authenticated --logout--> Anonymous
//!       ^                      ^
//!       |  fetch fails         | fetch succeeds
//!       +------ TokenOnly -----+
//! ```
//!
//! `TokenOnly` is the state after a restart: a token was persisted but the
//! user behind it has not been fetched yet.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use super::history::History;
use crate::api::ApiClient;
use crate::error::AuthError;
use crate::models::{LoginRequest, RegisterRequest, User};
use crate::router::paths;
use crate::traits::{keys, Storage};

/// Coarse session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPhase {
    /// No token.
    Anonymous,
    /// Token held, user not loaded.
    TokenOnly,
    /// Token and user loaded.
    Authenticated,
}

/// Owns the session token and the current user.
///
/// The token lives in the [`ApiClient`]'s shared slot so requests pick it up
/// immediately. Token and user are always set or cleared together.
pub struct AuthStore {
    api: ApiClient,
    storage: Arc<dyn Storage>,
    history: History,
    user: RwLock<Option<User>>,
    loading: AtomicBool,
    initialized: OnceCell<()>,
}

/// Resets the loading flag when a fetch finishes, however it finishes.
struct LoadingGuard<'a>(&'a AtomicBool);

impl<'a> LoadingGuard<'a> {
    fn start(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(flag)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl AuthStore {
    /// Build the store, restoring a persisted token without contacting the backend.
    pub fn new(api: ApiClient, storage: Arc<dyn Storage>, history: History) -> Self {
        match storage.get(keys::ACCESS_TOKEN) {
            Ok(Some(token)) if !token.is_empty() => api.token().set(token),
            Ok(_) => api.token().clear(),
            Err(err) => {
                warn!(error = %err, "could not read stored session");
                api.token().clear();
            }
        }

        Self {
            api,
            storage,
            history,
            user: RwLock::new(None),
            loading: AtomicBool::new(false),
            initialized: OnceCell::new(),
        }
    }

    /// Fetch the user for a restored token. Runs at most once per store.
    pub async fn initialize(&self) {
        self.initialized
            .get_or_init(|| async {
                if self.token().is_some() {
                    if let Err(err) = self.fetch_current_user().await {
                        debug!(error = %err, "restored session was not accepted");
                    }
                }
            })
            .await;
    }

    pub fn phase(&self) -> AuthPhase {
        match (self.token().is_some(), self.user().is_some()) {
            (false, _) => AuthPhase::Anonymous,
            (true, false) => AuthPhase::TokenOnly,
            (true, true) => AuthPhase::Authenticated,
        }
    }

    /// True whenever a token is held, even before the user is fetched.
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    pub fn token(&self) -> Option<String> {
        self.api.token().get()
    }

    pub fn user(&self) -> Option<User> {
        match self.user.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    fn set_user(&self, user: Option<User>) {
        match self.user.write() {
            Ok(mut guard) => *guard = user,
            Err(poisoned) => *poisoned.into_inner() = user,
        }
    }

    /// Log in and move to the dashboard.
    ///
    /// On failure nothing changes and the error carries the backend's message.
    pub async fn login(&self, request: &LoginRequest) -> Result<User, AuthError> {
        let response = self
            .api
            .auth()
            .login(request)
            .await
            .map_err(|e| AuthError::api("login", e))?;

        self.storage
            .set(keys::ACCESS_TOKEN, &response.access_token)
            .map_err(AuthError::Persist)?;
        self.api.token().set(response.access_token);
        self.set_user(Some(response.user.clone()));

        info!(user = %response.user.username, "logged in");
        self.history.push(paths::DASHBOARD);
        Ok(response.user)
    }

    /// Create an account. The session is not touched.
    pub async fn register(&self, request: &RegisterRequest) -> Result<User, AuthError> {
        self.api
            .auth()
            .register(request)
            .await
            .map_err(|e| AuthError::api("register", e))
    }

    /// Load the user behind the current token.
    ///
    /// Without a token this returns `Ok(None)` and sends nothing. Any
    /// failure resets the session to anonymous before the error is returned,
    /// so callers that only care about state can ignore it.
    pub async fn fetch_current_user(&self) -> Result<Option<User>, AuthError> {
        if self.token().is_none() {
            return Ok(None);
        }

        let _loading = LoadingGuard::start(&self.loading);
        match self.api.auth().me().await {
            Ok(user) => {
                debug!(user = %user.username, "session restored");
                self.set_user(Some(user.clone()));
                Ok(Some(user))
            }
            Err(err) => {
                warn!(error = %err, "dropping session after failed user fetch");
                self.clear_session();
                Err(AuthError::api("me", err))
            }
        }
    }

    /// Tell the backend, then drop the session whatever it answered.
    pub async fn logout(&self) {
        if let Err(err) = self.api.auth().logout().await {
            warn!(error = %err, "logout request failed");
        }
        self.clear_session();
        info!("logged out");
        self.history.push(paths::LOGIN);
    }

    fn clear_session(&self) {
        self.api.token().clear();
        self.set_user(None);
        if let Err(err) = self.storage.remove(keys::ACCESS_TOKEN) {
            warn!(error = %err, "could not remove stored session");
        }
    }
}
