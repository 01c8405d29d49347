//! CLI module for prophet.
//!
//! - Argument parsing into [`CliCommand`]
//! - [`Context`], the composition root holding the API client and stores
//! - One handler per command group under `commands`
//!
//! # Usage
//!
//! ```ignore
//! use prophet::cli::{parse_args, run_cli_command, Context};
//!
//! let cli = parse_args(std::env::args())?;
//! let ctx = Context::new(config);
//! run_cli_command(cli.command, &ctx).await?;
//! ```

pub mod args;
pub mod commands;
pub mod help;
pub mod version;

pub use args::{parse_args, Cli, CliCommand};
pub use help::{handle_help_command, USAGE};
pub use version::{handle_version_command, VERSION};

use std::sync::Arc;

use crate::adapters::{FileStorage, ReqwestHttpClient};
use crate::api::ApiClient;
use crate::config::ClientConfig;
use crate::error::ProphetResult;
use crate::router::Router;
use crate::state::{AuthStore, History, LocaleStore, SessionToken, SettingsStore};
use crate::traits::{HttpClient, Storage};

/// Everything a command needs, built once per process.
pub struct Context {
    pub config: ClientConfig,
    pub api: ApiClient,
    pub auth: AuthStore,
    pub locale: LocaleStore,
    pub settings: SettingsStore,
}

impl Context {
    /// Wire the real HTTP client and file storage from `config`.
    pub fn new(config: ClientConfig) -> Self {
        let http: Arc<dyn HttpClient> =
            Arc::new(ReqwestHttpClient::with_connect_timeout(config.connect_timeout));
        let storage: Arc<dyn Storage> = Arc::new(FileStorage::at(config.storage_path()));
        Self::with_parts(config, http, storage)
    }

    /// Wire explicit adapters, e.g. mocks in tests.
    pub fn with_parts(config: ClientConfig, http: Arc<dyn HttpClient>, storage: Arc<dyn Storage>) -> Self {
        let api = ApiClient::new(config.base_url.clone(), http, SessionToken::default());
        let auth = AuthStore::new(api.clone(), storage.clone(), History::new());
        let locale = LocaleStore::new(storage.clone());
        let settings = SettingsStore::new(storage);
        Self {
            config,
            api,
            auth,
            locale,
            settings,
        }
    }

    pub fn router(&self) -> Router<'_> {
        Router::new(&self.auth)
    }

    /// Shorthand for a localized column label.
    pub fn label<'a>(&self, key: &'a str) -> &'a str {
        self.locale.label(key)
    }
}

impl CliCommand {
    /// Commands that work on the backend session.
    pub fn needs_session(&self) -> bool {
        !matches!(
            self,
            CliCommand::Version
                | CliCommand::Help
                | CliCommand::Locale(_)
                | CliCommand::PageSize(_)
                | CliCommand::Captcha { .. }
                | CliCommand::Login { .. }
                | CliCommand::Register { .. }
        )
    }
}

/// Run one command to completion.
pub async fn run_cli_command(command: CliCommand, ctx: &Context) -> ProphetResult<()> {
    if command.needs_session() {
        ctx.auth.initialize().await;
    }

    match command {
        CliCommand::Version => {
            handle_version_command();
            Ok(())
        }
        CliCommand::Help => {
            handle_help_command();
            Ok(())
        }
        CliCommand::Captcha { out, open } => commands::session::captcha(ctx, out, open).await,
        CliCommand::Login {
            username,
            captcha_id,
            captcha,
        } => commands::session::login(ctx, username, captcha_id, captcha).await,
        CliCommand::Register {
            username,
            email,
            captcha_id,
            captcha,
        } => commands::session::register(ctx, username, email, captcha_id, captcha).await,
        CliCommand::Logout => commands::session::logout(ctx).await,
        CliCommand::Whoami => commands::session::whoami(ctx),
        CliCommand::Hosts(cmd) => commands::hosts::run(ctx, cmd).await,
        CliCommand::Scans(cmd) => commands::tasks::run_scans(ctx, cmd).await,
        CliCommand::Collections(cmd) => commands::tasks::run_collections(ctx, cmd).await,
        CliCommand::Platforms(cmd) => commands::catalog::run_platforms(ctx, cmd).await,
        CliCommand::Tags(cmd) => commands::catalog::run_tags(ctx, cmd).await,
        CliCommand::Apps(cmd) => commands::apps::run(ctx, cmd).await,
        CliCommand::ConfigGet => commands::prefs::config_get(ctx).await,
        CliCommand::ConfigSet { scan, collect } => {
            commands::prefs::config_set(ctx, scan, collect).await
        }
        CliCommand::ImportHosts { file } => commands::prefs::import_hosts(ctx, &file).await,
        CliCommand::Locale(action) => commands::prefs::locale(ctx, action),
        CliCommand::PageSize(size) => commands::prefs::page_size(ctx, size),
        CliCommand::Open { path } => commands::prefs::open_route(ctx, &path).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{InMemoryStorage, MockHttpClient};

    #[tokio::test]
    async fn test_help_sends_no_requests() {
        let mock = MockHttpClient::new();
        let storage = InMemoryStorage::with_entries([("access_token", "t")]);
        let ctx = Context::with_parts(
            ClientConfig::default(),
            Arc::new(mock.clone()),
            Arc::new(storage),
        );

        run_cli_command(CliCommand::Help, &ctx).await.unwrap();
        assert!(mock.get_requests().is_empty());
    }
}
