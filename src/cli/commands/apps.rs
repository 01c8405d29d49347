//! Applications and their topology graphs.

use std::collections::HashSet;
use std::path::Path;

use tracing::info;

use crate::cli::args::AppsCommand;
use crate::cli::Context;
use crate::cli_output::{icons, print_fields, print_header, print_status, Table};
use crate::error::{ErrorContext, ProphetResult, ResultExt};
use crate::models::{format_timestamp, GraphPayload};

use super::{or_dash, save_download};

pub async fn run(ctx: &Context, command: AppsCommand) -> ProphetResult<()> {
    match command {
        AppsCommand::List => list(ctx).await,
        AppsCommand::Show { id } => show(ctx, id).await,
        AppsCommand::GraphGet { id } => {
            let graph = ctx
                .api
                .applications()
                .get_graph(id)
                .await
                .context(ErrorContext::new("load graph").with_resource("application", id))?;
            println!("{}", serde_json::to_string_pretty(&graph)?);
            Ok(())
        }
        AppsCommand::GraphSave { id, file } => save_graph(ctx, id, &file).await,
        AppsCommand::GraphExport { id, out } => {
            let download = ctx.api.applications().export_graph(id).await?;
            save_download(&download, out.as_deref(), &format!("application_{}_graph.json", id))?;
            Ok(())
        }
    }
}

async fn list(ctx: &Context) -> ProphetResult<()> {
    let apps = ctx.api.applications().list().await?;
    if apps.is_empty() {
        println!("{}", ctx.label("empty"));
        return Ok(());
    }
    let mut table = Table::new([
        ctx.label("id"),
        ctx.label("name"),
        ctx.label("hosts"),
        ctx.label("description"),
        ctx.label("created_at"),
    ]);
    for app in &apps {
        table.row([
            app.id.to_string(),
            app.name.clone(),
            app.member_count().to_string(),
            or_dash(app.description.as_deref()),
            format_timestamp(app.created_at.as_ref()),
        ]);
    }
    table.print();
    Ok(())
}

async fn show(ctx: &Context, id: i64) -> ProphetResult<()> {
    let app = ctx
        .api
        .applications()
        .get(id)
        .await
        .context(ErrorContext::new("show application").with_resource("application", id))?;

    print_header(&app.name);
    let nodes = app.graph_layout.as_ref().map(|g| g.nodes.len()).unwrap_or(0);
    print_fields(&[
        (ctx.label("id"), app.id.to_string()),
        (ctx.label("description"), or_dash(app.description.as_deref())),
        (ctx.label("hosts"), app.member_count().to_string()),
        (ctx.label("graph_nodes"), nodes.to_string()),
        (ctx.label("created_at"), format_timestamp(app.created_at.as_ref())),
    ]);
    if !app.hosts.is_empty() {
        println!();
        super::hosts::host_table(ctx, &app.hosts).print();
    }
    Ok(())
}

/// Read a graph document, check it locally, then replace the stored graph.
async fn save_graph(ctx: &Context, id: i64, file: &Path) -> ProphetResult<()> {
    let raw = std::fs::read_to_string(file)?;
    let graph: GraphPayload = serde_json::from_str(&raw)?;
    graph.validate()?;

    if !graph.bound_host_ids().is_empty() {
        let app = ctx
            .api
            .applications()
            .get(id)
            .await
            .context(ErrorContext::new("load application").with_resource("application", id))?;
        let members: HashSet<i64> = app.hosts.iter().map(|h| h.id).collect();
        graph.validate_bindings(&members)?;
    }

    ctx.api
        .applications()
        .save_graph(id, &graph)
        .await
        .context(ErrorContext::new("save graph").with_resource("application", id))?;

    info!(
        application = id,
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        "graph saved"
    );
    print_status(
        icons::SUCCESS,
        &format!(
            "Saved graph with {} node(s) and {} edge(s)",
            graph.nodes.len(),
            graph.edges.len()
        ),
    );
    Ok(())
}
