//! Scan and collection task commands.

use std::time::Duration;

use crate::cli::args::{CollectionsCommand, ListArgs, ScansCommand};
use crate::cli::Context;
use crate::cli_output::{icons, print_progress, print_progress_done, print_status, Table, SPINNER_CHARS};
use crate::error::{ErrorContext, ProphetResult, ResultExt};
use crate::models::{format_timestamp, CollectionTask, ScanRequest, ScanTask, TaskFilter, TaskStatus};

use super::{or_dash, page_footer, save_download};

/// Delay between polls of `collections watch`.
pub const WATCH_INTERVAL: Duration = Duration::from_secs(2);

fn task_filter(ctx: &Context, args: ListArgs) -> TaskFilter {
    TaskFilter {
        page: args.page,
        per_page: Some(args.per_page.unwrap_or_else(|| ctx.settings.default_page_size())),
        status: args.status,
    }
}

fn status_icon(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Completed => icons::SUCCESS,
        TaskStatus::Failed | TaskStatus::Cancelled => icons::FAILURE,
        _ => icons::WARNING,
    }
}

pub async fn run_scans(ctx: &Context, command: ScansCommand) -> ProphetResult<()> {
    let scans = ctx.api.scans();
    match command {
        ScansCommand::List(args) => {
            let page = scans.list(&task_filter(ctx, args)).await?;
            scan_table(ctx, &page.items).print();
            println!(
                "{}",
                page_footer(page.pagination.as_ref(), page.items.len(), ctx.label("total"))
            );
        }
        ScansCommand::Show { id } => {
            let task = scans
                .get(id)
                .await
                .context(ErrorContext::new("show scan").with_resource("scan", id))?;
            scan_table(ctx, std::slice::from_ref(&task)).print();
            if let Some(host) = &task.current_host {
                println!("  {} {}", ctx.label("scanning"), host);
            }
            if let Some(error) = &task.error_message {
                print_status(icons::FAILURE, error);
            }
        }
        ScansCommand::Create {
            name,
            target,
            nmap_args,
        } => {
            let task = scans
                .create(&ScanRequest {
                    name,
                    target,
                    nmap_args,
                })
                .await?;
            print_status(icons::SUCCESS, &format!("Scan {} queued", task.id));
        }
        ScansCommand::Cancel { id } => {
            let task = scans.cancel(id).await?;
            print_status(
                status_icon(task.status),
                &format!("Scan {} is {}", task.id, task.status.as_str()),
            );
        }
        ScansCommand::Results { id } => {
            let hosts = scans.results(id).await?;
            super::hosts::host_table(ctx, &hosts).print();
        }
    }
    Ok(())
}

fn scan_table(ctx: &Context, tasks: &[ScanTask]) -> Table {
    let mut table = Table::new([
        ctx.label("id"),
        ctx.label("name"),
        ctx.label("target"),
        ctx.label("status"),
        ctx.label("progress"),
        ctx.label("results"),
        ctx.label("created_at"),
    ]);
    for task in tasks {
        table.row([
            task.id.to_string(),
            task.name.clone(),
            task.target.clone(),
            task.status.as_str().to_string(),
            format!("{:.0}%", task.progress),
            task.result_count.to_string(),
            format_timestamp(task.created_at.as_ref()),
        ]);
    }
    table
}

pub async fn run_collections(ctx: &Context, command: CollectionsCommand) -> ProphetResult<()> {
    let collections = ctx.api.collections();
    match command {
        CollectionsCommand::List(args) => {
            let page = collections.list(&task_filter(ctx, args)).await?;
            collection_table(ctx, &page.items).print();
            println!(
                "{}",
                page_footer(page.pagination.as_ref(), page.items.len(), ctx.label("total"))
            );
        }
        CollectionsCommand::Show { id } => {
            let task = collections
                .get(id)
                .await
                .context(ErrorContext::new("show collection").with_resource("collection", id))?;
            collection_table(ctx, std::slice::from_ref(&task)).print();
            let results = collections.results(id).await?;
            if !results.is_empty() {
                println!();
                let mut table = Table::new([
                    ctx.label("id"),
                    ctx.label("ip"),
                    ctx.label("hostname"),
                    ctx.label("status"),
                    ctx.label("error"),
                ]);
                for result in &results {
                    table.row([
                        result.id.to_string(),
                        result.ip.clone(),
                        or_dash(result.hostname.as_deref()),
                        or_dash(result.collection_status.as_deref()),
                        or_dash(result.error_message.as_deref()),
                    ]);
                }
                table.print();
            }
        }
        CollectionsCommand::Cancel { id } => {
            let task = collections.cancel(id).await?;
            print_status(
                status_icon(task.status),
                &format!("Task {} is {}", task.id, task.status.as_str()),
            );
        }
        CollectionsCommand::Retry { id } => {
            let task = collections.retry(id).await?;
            print_status(icons::SUCCESS, &format!("Task {} restarted", task.id));
        }
        CollectionsCommand::Watch { id } => {
            watch(ctx, id).await?;
        }
        CollectionsCommand::Export { id, out } => {
            let download = collections.export_csv(id).await?;
            save_download(&download, out.as_deref(), &format!("collection_{}.csv", id))?;
        }
    }
    Ok(())
}

/// One-line summary of a task's progress.
pub fn progress_line(task: &CollectionTask) -> String {
    let target = match task.synced_platform_id() {
        Some(platform) => format!("platform {} sync", platform),
        None => format!("{} host(s)", task.total_count),
    };
    format!(
        "task {} [{}] {:.0}% ({} ok, {} failed, {} running) {}",
        task.id,
        task.status.as_str(),
        task.progress,
        task.completed_count,
        task.failed_count,
        task.current_running,
        target
    )
}

async fn watch(ctx: &Context, id: i64) -> ProphetResult<()> {
    let mut tick = 0usize;
    loop {
        let task = ctx.api.collections().get(id).await?;
        if task.status.is_terminal() {
            print_progress_done(status_icon(task.status), &progress_line(&task));
            return Ok(());
        }
        print_progress(SPINNER_CHARS[tick % SPINNER_CHARS.len()], &progress_line(&task));
        tick += 1;
        tokio::time::sleep(WATCH_INTERVAL).await;
    }
}

fn collection_table(ctx: &Context, tasks: &[CollectionTask]) -> Table {
    let mut table = Table::new([
        ctx.label("id"),
        ctx.label("type"),
        ctx.label("status"),
        ctx.label("progress"),
        ctx.label("hosts"),
        ctx.label("error"),
        ctx.label("created_at"),
    ]);
    for task in tasks {
        let kind = match task.synced_platform_id() {
            Some(platform) => format!("sync #{}", platform),
            None => "collect".to_string(),
        };
        table.row([
            task.id.to_string(),
            kind,
            task.status.as_str().to_string(),
            format!("{:.0}%", task.progress),
            format!("{}/{}", task.completed_count + task.failed_count, task.total_count),
            or_dash(task.error_message.as_deref()),
            format_timestamp(task.created_at.as_ref()),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_line_for_platform_sync() {
        let task = CollectionTask {
            id: 4,
            host_ids: vec![-2],
            status: TaskStatus::Running,
            progress: 50.0,
            ..Default::default()
        };
        assert_eq!(
            progress_line(&task),
            "task 4 [running] 50% (0 ok, 0 failed, 0 running) platform 2 sync"
        );
    }
}
