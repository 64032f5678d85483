use anyhow::Result;
use snugblog::{id::EntityId, routes};

use crate::{context::AppContext, examples::ExampleGroup, output::OutputManager, theme::ICONS};

pub const LIKE_EXAMPLES: &[ExampleGroup] = &[ExampleGroup {
    title: "Like or unlike a post",
    commands: &["snugblog like 12             # Run again to take the like back"],
}];

pub const CONNECT_EXAMPLES: &[ExampleGroup] = &[ExampleGroup {
    title: "Connect with a user",
    commands: &["snugblog connect 7           # Run again to disconnect"],
}];

pub const USER_LIST_EXAMPLES: &[ExampleGroup] = &[ExampleGroup {
    title: "Who liked a post, who is connected to a user",
    commands: &["snugblog user-list like 12", "snugblog user-list connections 7"],
}];

pub const SEARCH_EXAMPLES: &[ExampleGroup] = &[ExampleGroup {
    title: "Find users",
    commands: &[
        "snugblog search al                  # Usernames starting with 'al'",
        "snugblog search bob@example.com     # Jump to the profile with that email",
    ],
}];

pub async fn handle_like(post_id: EntityId, ctx: &AppContext, output: &OutputManager) -> Result<()> {
    let viewer = ctx.viewer().await?;
    let reply = routes::like(&ctx.service, &viewer, post_id).await?;
    output.reply(&reply)?;
    let post = ctx.service.get_post(post_id).await?;
    output.info(&format!("{} {} likes on \"{}\"", ICONS.heart, post.likes, post.title));
    Ok(())
}

pub async fn handle_connect(user_id: EntityId, ctx: &AppContext, output: &OutputManager) -> Result<()> {
    let viewer = ctx.viewer().await?;
    let reply = routes::connect(&ctx.service, &viewer, user_id).await?;
    output.reply(&reply)?;
    let me = ctx.service.user(viewer.id).await?;
    if me.is_connected_to(user_id) {
        output.success(&format!("{} Connected with user {user_id}", ICONS.link));
    } else {
        output.warning(&format!("No longer connected with user {user_id}"));
    }
    Ok(())
}

pub async fn handle_user_list(content: &str, id: EntityId, ctx: &AppContext, output: &OutputManager) -> Result<()> {
    let viewer = ctx.viewer().await?;
    let page = routes::user_list(&ctx.service, &viewer, content, id).await?;
    output.heading(page.legend);
    output.display(&page)
}

pub async fn handle_search(query: &str, ctx: &AppContext, output: &OutputManager) -> Result<()> {
    let viewer = ctx.viewer().await?;
    match routes::search(&ctx.service, &viewer, query).await? {
        routes::Response::Render(users) => {
            output.heading("Search User");
            output.display(&users)?;
        }
        routes::Response::Redirect(reply) => {
            output.reply(&reply)?;
            output.info(&format!("Matched profile {}", reply.redirect));
        }
    }
    Ok(())
}
