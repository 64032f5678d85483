use anyhow::Result;
use clap::Subcommand;
use snugblog::{forms::MessageForm, id::EntityId, routes};

use super::report;
use crate::{context::AppContext, examples::ExampleGroup, output::OutputManager};

pub const EXAMPLES: &[ExampleGroup] = &[ExampleGroup {
    title: "Direct messages",
    commands: &[
        "snugblog message send 7 \"hi\"",
        "snugblog message show 7            # Both directions, oldest first",
    ],
}];

#[derive(Subcommand)]
pub enum MessageCommands {
    /// Send a message to a user
    Send {
        to: EntityId,
        content: String,
        /// Sender to claim; defaults to the signed in user
        #[arg(long = "as")]
        as_user: Option<EntityId>,
    },
    /// Show your conversation with a user
    Show { with: EntityId },
}

pub async fn handle_message_commands(command: MessageCommands, ctx: &AppContext, output: &OutputManager) -> Result<()> {
    let viewer = ctx.viewer().await?;
    match command {
        MessageCommands::Send { to, content, as_user } => {
            let sender = as_user.unwrap_or(viewer.id);
            let reply = routes::send_message(&ctx.service, &viewer, to, sender, MessageForm { content })
                .await
                .map_err(|err| report(output, err))?;
            output.reply(&reply)?;
        }
        MessageCommands::Show { with } => match routes::messages(&ctx.service, &viewer, with, viewer.id).await? {
            routes::Response::Render(view) => {
                output.heading(&format!("Messages with {}", view.with.username));
                output.display(&view)?;
            }
            routes::Response::Redirect(reply) => output.reply(&reply)?,
        },
    }
    Ok(())
}
