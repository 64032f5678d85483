use anyhow::Result;
use clap::Subcommand;
use snugblog::{
    forms::{CommentForm, PostForm},
    id::EntityId,
    routes,
};

use super::report;
use crate::{context::AppContext, examples::ExampleGroup, output::OutputManager};

pub const POST_EXAMPLES: &[ExampleGroup] = &[
    ExampleGroup {
        title: "Read",
        commands: &[
            "snugblog post feed                 # Newest posts first",
            "snugblog post show 12",
            "snugblog post by alice             # Everything alice wrote",
        ],
    },
    ExampleGroup {
        title: "Write",
        commands: &[
            "snugblog post new --title \"Hello\" --content \"First post\"",
            "snugblog post edit 12 --title \"Hello again\" --content \"Edited\"",
            "snugblog post delete 12",
        ],
    },
];

pub const COMMENT_EXAMPLES: &[ExampleGroup] = &[ExampleGroup {
    title: "Comment on a post",
    commands: &[
        "snugblog comment 12 \"Nice one\"",
        "snugblog comments 12",
    ],
}];

#[derive(Subcommand)]
pub enum PostCommands {
    /// Show the home feed
    Feed,
    /// Show one post
    Show { id: EntityId },
    /// List the posts of a user
    By { username: String },
    /// Write a new post
    New {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
    },
    /// Edit one of your posts
    Edit {
        id: EntityId,
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
    },
    /// Delete one of your posts
    Delete { id: EntityId },
}

pub async fn handle_post_commands(command: PostCommands, ctx: &AppContext, output: &OutputManager) -> Result<()> {
    let service = &ctx.service;
    match command {
        PostCommands::Feed => {
            output.heading("Recent posts");
            output.display(&service.recent_posts().await?)?;
        }
        PostCommands::Show { id } => {
            let post = service.get_post(id).await?;
            output.heading(&post.title);
            output.display(&post)?;
        }
        PostCommands::By { username } => {
            let (user, posts) = service.posts_by_username(&username).await?;
            output.heading(&format!("Posts by {} ({})", user.username, posts.len()));
            output.display(&posts)?;
        }
        PostCommands::New { title, content } => {
            let viewer = ctx.viewer().await?;
            let reply = routes::new_post(service, &viewer, PostForm { title, content })
                .await
                .map_err(|err| report(output, err))?;
            output.reply(&reply)?;
        }
        PostCommands::Edit { id, title, content } => {
            let viewer = ctx.viewer().await?;
            let reply = routes::update_post(service, &viewer, id, PostForm { title, content })
                .await
                .map_err(|err| report(output, err))?;
            output.reply(&reply)?;
        }
        PostCommands::Delete { id } => {
            let viewer = ctx.viewer().await?;
            let reply = routes::delete_post(service, &viewer, id).await?;
            output.reply(&reply)?;
        }
    }
    Ok(())
}

pub async fn handle_comment(post_id: EntityId, content: String, ctx: &AppContext, output: &OutputManager) -> Result<()> {
    let viewer = ctx.viewer().await?;
    let reply = routes::comment(&ctx.service, &viewer, post_id, CommentForm { content })
        .await
        .map_err(|err| report(output, err))?;
    output.reply(&reply)
}

pub async fn handle_comments(post_id: EntityId, ctx: &AppContext, output: &OutputManager) -> Result<()> {
    let comments = ctx.service.comments_for_post(post_id).await?;
    output.heading(&format!("Comments on post {post_id}"));
    output.display(&comments)
}
