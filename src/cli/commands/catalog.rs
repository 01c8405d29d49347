//! Platforms and tags.

use crate::cli::args::{PlatformsCommand, TagsCommand};
use crate::cli::Context;
use crate::cli_output::{icons, print_status, Table};
use crate::error::{ErrorContext, ProphetResult, ResultExt};
use crate::models::TagInput;

use super::or_dash;

pub async fn run_platforms(ctx: &Context, command: PlatformsCommand) -> ProphetResult<()> {
    let platforms = ctx.api.platforms();
    match command {
        PlatformsCommand::List => {
            let list = platforms.list().await?;
            let mut table = Table::new([
                ctx.label("id"),
                ctx.label("name"),
                ctx.label("type"),
                ctx.label("address"),
                ctx.label("username"),
                ctx.label("hosts"),
                ctx.label("tags"),
            ]);
            for platform in &list {
                let address = match platform.port {
                    Some(port) => format!("{}:{}", platform.host, port),
                    None => platform.host.clone(),
                };
                let tags: Vec<&str> = platform.tags.iter().map(|t| t.name.as_str()).collect();
                table.row([
                    platform.id.to_string(),
                    platform.name.clone(),
                    platform.platform_type.clone(),
                    address,
                    or_dash(platform.username.as_deref()),
                    or_dash(platform.vm_count.or(platform.host_count)),
                    tags.join(","),
                ]);
            }
            table.print();
        }
        PlatformsCommand::Test { id } => {
            let result = platforms
                .test(id)
                .await
                .context(ErrorContext::new("test platform").with_resource("platform", id))?;
            if result.connected {
                print_status(icons::SUCCESS, &format!("Platform {} is reachable", id));
            } else {
                print_status(icons::FAILURE, &format!("Platform {} did not answer", id));
            }
        }
        PlatformsCommand::Sync { id } => {
            let started = platforms
                .sync(id)
                .await
                .context(ErrorContext::new("sync platform").with_resource("platform", id))?;
            print_status(
                icons::SUCCESS,
                &format!("Sync started as collection task {}", started.task_id),
            );
        }
    }
    Ok(())
}

pub async fn run_tags(ctx: &Context, command: TagsCommand) -> ProphetResult<()> {
    let tags = ctx.api.tags();
    match command {
        TagsCommand::List => {
            let list = tags.list().await?;
            let mut table = Table::new([
                ctx.label("id"),
                ctx.label("name"),
                ctx.label("color"),
                ctx.label("hosts"),
                ctx.label("description"),
            ]);
            for tag in &list {
                table.row([
                    tag.id.to_string(),
                    tag.name.clone(),
                    tag.color.clone(),
                    or_dash(tag.host_count),
                    or_dash(tag.description.as_deref()),
                ]);
            }
            table.print();
        }
        TagsCommand::Create {
            name,
            color,
            description,
        } => {
            let tag = tags
                .create(&TagInput {
                    name: Some(name),
                    color,
                    description,
                })
                .await?;
            print_status(icons::SUCCESS, &format!("Created tag {} ({})", tag.name, tag.id));
        }
        TagsCommand::Delete { id } => {
            tags.delete(id)
                .await
                .context(ErrorContext::new("delete tag").with_resource("tag", id))?;
            print_status(icons::SUCCESS, &format!("Deleted tag {}", id));
        }
        TagsCommand::Assign { tag_id, host_id } => {
            let host = tags.add_to_host(host_id, &[tag_id]).await?;
            let names: Vec<&str> = host.tags.iter().map(|t| t.name.as_str()).collect();
            print_status(
                icons::SUCCESS,
                &format!("{} now tagged: {}", host.display_name(), names.join(", ")),
            );
        }
        TagsCommand::Unassign { tag_id, host_id } => {
            tags.remove_from_host(host_id, tag_id).await?;
            print_status(
                icons::SUCCESS,
                &format!("Removed tag {} from host {}", tag_id, host_id),
            );
        }
    }
    Ok(())
}
