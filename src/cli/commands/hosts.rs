use crate::cli::args::{HostsCommand, ListArgs};
use crate::cli::Context;
use crate::cli_output::{icons, print_fields, print_header, print_status, Table};
use crate::error::{ErrorContext, ProphetResult, ResultExt};
use crate::models::{format_timestamp, Host, HostFilter};

use super::{or_dash, page_footer, save_download};

pub async fn run(ctx: &Context, command: HostsCommand) -> ProphetResult<()> {
    match command {
        HostsCommand::List(args) => list(ctx, args).await,
        HostsCommand::Show { id } => show(ctx, id).await,
        HostsCommand::Delete { ids } => delete(ctx, &ids).await,
        HostsCommand::Collect { ids, concurrent } => {
            let started = ctx.api.hosts().batch_collect(&ids, concurrent).await?;
            let task_ids: Vec<String> = started.task_ids().iter().map(i64::to_string).collect();
            print_status(
                icons::SUCCESS,
                &format!("Collection started, task(s) {}", task_ids.join(", ")),
            );
            println!("  Follow with: prophet collections watch <task-id>");
            Ok(())
        }
        HostsCommand::Export { id, format, out } => {
            let download = match id {
                Some(id) => ctx
                    .api
                    .hosts()
                    .export_host(id, format)
                    .await
                    .context(ErrorContext::new("export host").with_resource("host", id))?,
                None => ctx.api.hosts().export_csv(&HostFilter::default()).await?,
            };
            let fallback = match id {
                Some(id) => format!("host_{}.{}", id, format.as_str()),
                None => "hosts_export.csv".to_string(),
            };
            save_download(&download, out.as_deref(), &fallback)?;
            Ok(())
        }
    }
}

pub(crate) fn host_table(ctx: &Context, hosts: &[Host]) -> Table {
    let mut table = Table::new([
        ctx.label("id"),
        ctx.label("ip"),
        ctx.label("hostname"),
        ctx.label("os"),
        ctx.label("source"),
        ctx.label("status"),
        ctx.label("tags"),
    ]);
    for host in hosts {
        let os = [host.os_type.as_deref(), host.os_version.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");
        let tags: Vec<&str> = host.tags.iter().map(|t| t.name.as_str()).collect();
        table.row([
            host.id.to_string(),
            host.ip.clone(),
            or_dash(host.hostname.as_deref()),
            if os.is_empty() { "-".to_string() } else { os },
            host.source.as_str().to_string(),
            host.collection_status.as_str().to_string(),
            tags.join(","),
        ]);
    }
    table
}

async fn list(ctx: &Context, args: ListArgs) -> ProphetResult<()> {
    let filter = HostFilter {
        page: args.page,
        per_page: Some(args.per_page.unwrap_or_else(|| ctx.settings.default_page_size())),
        search: args.search,
        collection_status: args.status,
        ..Default::default()
    };
    let page = ctx.api.hosts().list(&filter).await?;

    if page.items.is_empty() {
        println!("{}", ctx.label("empty"));
        return Ok(());
    }
    host_table(ctx, &page.items).print();
    println!(
        "{}",
        page_footer(page.pagination.as_ref(), page.items.len(), ctx.label("total"))
    );
    Ok(())
}

async fn show(ctx: &Context, id: i64) -> ProphetResult<()> {
    let host = ctx
        .api
        .hosts()
        .get(id)
        .await
        .context(ErrorContext::new("show host").with_resource("host", id))?;

    print_header(host.display_name());
    print_fields(&[
        (ctx.label("id"), host.id.to_string()),
        (ctx.label("ip"), host.ip.clone()),
        (ctx.label("hostname"), or_dash(host.hostname.as_deref())),
        (ctx.label("os"), or_dash(host.os_type.as_deref())),
        (ctx.label("device_type"), or_dash(host.device_type.as_deref())),
        ("CPU", or_dash(host.cpu_cores)),
        ("RAM (GB)", or_dash(host.memory_total)),
        (ctx.label("status"), host.collection_status.as_str().to_string()),
        (ctx.label("collected_at"), format_timestamp(host.last_collected_at.as_ref())),
        (ctx.label("error"), or_dash(host.error_message.as_deref())),
    ]);
    Ok(())
}

async fn delete(ctx: &Context, ids: &[i64]) -> ProphetResult<()> {
    if let [id] = ids {
        ctx.api.hosts().delete(*id).await?;
        print_status(icons::SUCCESS, &format!("Deleted host {}", id));
        return Ok(());
    }

    let result = ctx.api.hosts().batch_delete(ids).await?;
    print_status(icons::SUCCESS, &format!("Deleted {} host(s)", result.deleted_count));
    if !result.failed_ids.is_empty() {
        let failed: Vec<String> = result.failed_ids.iter().map(i64::to_string).collect();
        print_status(icons::WARNING, &format!("Not deleted: {}", failed.join(", ")));
    }
    Ok(())
}
