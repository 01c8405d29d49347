//! Backend config, import and local preferences.

use std::path::Path;

use crate::cli::args::LocaleAction;
use crate::cli::Context;
use crate::cli_output::{icons, print_fields, print_status};
use crate::error::{ProphetError, ProphetResult};
use crate::models::ConcurrentConfig;
use crate::router::NavigationOutcome;

pub async fn config_get(ctx: &Context) -> ProphetResult<()> {
    let config = ctx.api.config().get_concurrent().await?;
    print_config(ctx, &config);
    Ok(())
}

/// Change one or both limits; the other keeps its current value.
pub async fn config_set(ctx: &Context, scan: Option<u32>, collect: Option<u32>) -> ProphetResult<()> {
    if scan.is_none() && collect.is_none() {
        return Err(ProphetError::usage("config set needs --scan and/or --collect"));
    }
    if scan == Some(0) || collect == Some(0) {
        return Err(ProphetError::usage("concurrency limits must be at least 1"));
    }

    let current = ctx.api.config().get_concurrent().await?;
    let wanted = ConcurrentConfig {
        scan_concurrent: scan.unwrap_or(current.scan_concurrent),
        collect_concurrent: collect.unwrap_or(current.collect_concurrent),
    };
    let saved = ctx.api.config().update_concurrent(&wanted).await?;
    print_status(icons::SUCCESS, "Configuration updated");
    print_config(ctx, &saved);
    Ok(())
}

fn print_config(ctx: &Context, config: &ConcurrentConfig) {
    print_fields(&[
        (ctx.label("scan_concurrent"), config.scan_concurrent.to_string()),
        (ctx.label("collect_concurrent"), config.collect_concurrent.to_string()),
    ]);
}

pub async fn import_hosts(ctx: &Context, file: &Path) -> ProphetResult<()> {
    let contents = std::fs::read(file)?;
    let file_name = file
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("hosts.csv");

    let report = ctx.api.import().hosts_csv(file_name, contents).await?;
    print_status(
        icons::SUCCESS,
        &format!("Imported: {} created, {} updated", report.created, report.updated),
    );
    for row in &report.errors {
        print_status(icons::WARNING, &format!("row {} ({}): {}", row.row, row.ip, row.error));
    }
    Ok(())
}

pub fn locale(ctx: &Context, action: LocaleAction) -> ProphetResult<()> {
    let current = match action {
        LocaleAction::Show => ctx.locale.locale(),
        LocaleAction::Toggle => ctx.locale.toggle_locale()?,
        LocaleAction::Set(locale) => {
            ctx.locale.set_locale(locale)?;
            locale
        }
    };
    print_fields(&[(ctx.label("language"), current.to_string())]);
    Ok(())
}

pub fn page_size(ctx: &Context, size: Option<u32>) -> ProphetResult<()> {
    if let Some(size) = size {
        ctx.settings.set_default_page_size(size)?;
    }
    print_fields(&[(ctx.label("page_size"), ctx.settings.default_page_size().to_string())]);
    Ok(())
}

/// Show where a navigation to `path` would land.
pub async fn open_route(ctx: &Context, path: &str) -> ProphetResult<()> {
    match ctx.router().navigate(path).await {
        NavigationOutcome::Proceed(route) => {
            print_status(icons::SUCCESS, &format!("{} ({})", route.path, route.name.as_str()));
        }
        NavigationOutcome::Redirect { from, to } => {
            print_status(
                icons::WARNING,
                &format!("{} redirected to {} ({})", from, to.path, to.name.as_str()),
            );
        }
    }
    Ok(())
}
