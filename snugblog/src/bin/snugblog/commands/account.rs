use anyhow::{Result, bail};
use clap::{Args, Subcommand};
use snugblog::{
    forms::{RegistrationForm, UpdateAccountForm},
    routes,
};

use super::report;
use crate::{context::AppContext, examples::ExampleGroup, output::OutputManager};

pub const REGISTER_EXAMPLES: &[ExampleGroup] = &[ExampleGroup {
    title: "Create an account",
    commands: &["snugblog register alice alice@example.com --password s3cret --confirm-password s3cret"],
}];

pub const ACCOUNT_EXAMPLES: &[ExampleGroup] = &[
    ExampleGroup {
        title: "Show your account",
        commands: &["snugblog --email alice@example.com --password s3cret account show"],
    },
    ExampleGroup {
        title: "Change name, email or picture",
        commands: &[
            "snugblog account update --username alice_b",
            "snugblog account update --new-email alice@work.example --picture me.png",
        ],
    },
];

pub const PROFILE_EXAMPLES: &[ExampleGroup] = &[ExampleGroup {
    title: "Look at someone's profile",
    commands: &["snugblog profile bob"],
}];

/// The password itself comes from the global `--password`.
#[derive(Args)]
pub struct RegisterArgs {
    pub username: String,
    #[arg(id = "address", value_name = "EMAIL")]
    pub address: String,
    #[arg(long)]
    pub confirm_password: String,
}

#[derive(Subcommand)]
pub enum AccountCommands {
    /// Show the signed in account
    Show,
    /// Change username, email or profile picture; omitted fields keep their value
    Update {
        #[arg(long)]
        username: Option<String>,
        #[arg(long = "new-email")]
        new_email: Option<String>,
        /// Filename of a new picture (jpg or png)
        #[arg(long)]
        picture: Option<String>,
    },
}

pub async fn handle_register(
    args: RegisterArgs,
    password: Option<String>,
    ctx: &AppContext,
    output: &OutputManager,
) -> Result<()> {
    let Some(password) = password else {
        bail!("register needs --password (or SNUGBLOG_PASSWORD)");
    };
    let form = RegistrationForm {
        username: args.username,
        email: args.address,
        password,
        confirm_password: args.confirm_password,
    };
    let reply = routes::register(&ctx.service, form)
        .await
        .map_err(|err| report(output, err))?;
    output.reply(&reply)
}

pub async fn handle_account_commands(command: AccountCommands, ctx: &AppContext, output: &OutputManager) -> Result<()> {
    let viewer = ctx.viewer().await?;
    match command {
        AccountCommands::Show => {
            output.heading("Account");
            let view = ctx.service.account(&viewer).await?;
            output.display(&view)?;
        }
        AccountCommands::Update {
            username,
            new_email,
            picture,
        } => {
            let current = ctx.service.user(viewer.id).await?;
            let form = UpdateAccountForm {
                username: username.unwrap_or(current.username),
                email: new_email.unwrap_or(current.email),
                picture,
            };
            let reply = routes::update_account(&ctx.service, &viewer, form)
                .await
                .map_err(|err| report(output, err))?;
            output.reply(&reply)?;
        }
    }
    Ok(())
}

pub async fn handle_profile(username: &str, ctx: &AppContext, output: &OutputManager) -> Result<()> {
    let viewer = ctx.viewer().await?;
    let view = ctx.service.profile(username, &viewer).await?;
    output.heading(&format!("Profile of {}", view.user.username));
    output.display(&view)?;
    if !view.connected_users.is_empty() {
        output.key_value("Connected user ids", &view.connected_users);
    }
    Ok(())
}
