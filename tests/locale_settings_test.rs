//! Preferences persisted through the file store, and their effect on commands.

mod common;

use std::sync::Arc;

use common::{host_json, mock_me_ok, url, BASE, TOKEN};
use prophet::adapters::mock::{MockHttpClient, MockResponse};
use prophet::adapters::FileStorage;
use prophet::cli::args::{HostsCommand, ListArgs, LocaleAction};
use prophet::cli::{run_cli_command, CliCommand, Context};
use prophet::config::ClientConfig;
use prophet::state::{Locale, LocaleStore, SettingsStore, DEFAULT_PAGE_SIZE};
use prophet::traits::Storage;
use serde_json::json;

#[test]
fn test_locale_survives_restart() {
    let dir = tempfile::tempdir().unwrap();

    let store = LocaleStore::new(Arc::new(FileStorage::in_dir(dir.path())));
    assert_eq!(store.locale(), Locale::ZhCn);
    assert_eq!(store.toggle_locale().unwrap(), Locale::EnUs);

    let reopened = LocaleStore::new(Arc::new(FileStorage::in_dir(dir.path())));
    assert_eq!(reopened.locale(), Locale::EnUs);
    assert_eq!(reopened.label("status"), "Status");
}

#[test]
fn test_page_size_survives_restart() {
    let dir = tempfile::tempdir().unwrap();

    let settings = SettingsStore::new(Arc::new(FileStorage::in_dir(dir.path())));
    assert_eq!(settings.default_page_size(), DEFAULT_PAGE_SIZE);
    settings.set_default_page_size(50).unwrap();
    assert!(settings.set_default_page_size(0).is_err());

    let reopened = SettingsStore::new(Arc::new(FileStorage::in_dir(dir.path())));
    assert_eq!(reopened.default_page_size(), 50);
}

#[test]
fn test_garbage_page_size_falls_back() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::in_dir(dir.path());
    storage.set("defaultPageSize", "twenty").unwrap();

    let settings = SettingsStore::new(Arc::new(storage));

    assert_eq!(settings.default_page_size(), DEFAULT_PAGE_SIZE);
}

#[tokio::test]
async fn test_host_list_uses_stored_page_size() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::in_dir(dir.path());
    storage.set("access_token", TOKEN).unwrap();
    storage.set("defaultPageSize", "25").unwrap();

    let mock = MockHttpClient::new();
    mock_me_ok(&mock);
    mock.set_method_response(
        "GET",
        &url("/hosts"),
        MockResponse::ok(json!([host_json(1, "10.0.0.1")])),
    );
    let ctx = Context::with_parts(
        ClientConfig::default().with_base_url(BASE),
        Arc::new(mock.clone()),
        Arc::new(storage),
    );

    run_cli_command(CliCommand::Hosts(HostsCommand::List(ListArgs::default())), &ctx)
        .await
        .unwrap();

    let list = mock
        .get_requests()
        .into_iter()
        .find(|r| r.path() == url("/hosts"))
        .unwrap();
    assert_eq!(list.query(), "per_page=25");
}

#[tokio::test]
async fn test_locale_command_needs_no_backend() {
    let dir = tempfile::tempdir().unwrap();
    let mock = MockHttpClient::new();
    let ctx = Context::with_parts(
        ClientConfig::default().with_base_url(BASE),
        Arc::new(mock.clone()),
        Arc::new(FileStorage::in_dir(dir.path())),
    );

    run_cli_command(CliCommand::Locale(LocaleAction::Set(Locale::EnUs)), &ctx)
        .await
        .unwrap();

    assert!(mock.get_requests().is_empty());
    assert_eq!(ctx.locale.locale(), Locale::EnUs);
}
