mod commands;
mod context;
mod examples;
mod output;
mod theme;
mod views;

use std::fmt::Write;
use std::io::{self, Write as IoWrite};
use std::path::PathBuf;

use anyhow::Result;
use clap::{
    ColorChoice, Command, CommandFactory, FromArgMatches, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Color as ClapColor, RgbColor, Style},
    },
    error::ErrorKind,
};
use colored::{Color as ThemeColor, Colorize, control::ShouldColorize};
use snugblog::id::EntityId;

use commands::{
    account::{AccountCommands, RegisterArgs, handle_account_commands, handle_profile, handle_register},
    message::{MessageCommands, handle_message_commands},
    post::{PostCommands, handle_comment, handle_comments, handle_post_commands},
    social::{handle_connect, handle_like, handle_search, handle_user_list},
};
use context::{AppContext, ConnectionArgs};
use examples::{ExampleGroup, command_examples};
use output::{GlobalOptions, OutputFormat, OutputManager};
use theme::{ICONS, THEME};

const ENVIRONMENT_VARIABLES: &[(&str, &str)] = &[
    ("SNUGBLOG_CONFIG", "Path to the TOML configuration file"),
    ("REDIS_URL", "Redis Stack connection URL (overrides the config file)"),
    ("SNUGBLOG_EMAIL", "Email of the account commands act as"),
    ("SNUGBLOG_PASSWORD", "Password of that account"),
    ("RUST_LOG", "Log filter, e.g. snugblog=debug"),
];

#[derive(Parser)]
#[command(name = "snugblog")]
#[command(version)]
#[command(
    about = "Blog with likes, connections and direct messages",
    long_about = r#"Command line client for a snugblog site stored in Redis Stack.

Commands that act for someone sign in first with --email and --password."#
)]
#[command(subcommand_required = true, arg_required_else_help = true)]
struct Cli {
    /// Output format
    #[arg(long, value_enum, default_value = "table", global = true)]
    output: OutputFormat,

    /// Suppress output (only errors will be shown)
    #[arg(short = 'q', long, global = true)]
    quiet: bool,

    /// Enable verbose output
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Configuration file
    #[arg(long, env = "SNUGBLOG_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Redis URL
    #[arg(long, env = "REDIS_URL", global = true)]
    redis_url: Option<String>,

    /// Email to sign in with
    #[arg(long, env = "SNUGBLOG_EMAIL", global = true)]
    email: Option<String>,

    /// Password to sign in with
    #[arg(long, env = "SNUGBLOG_PASSWORD", hide_env_values = true, global = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account
    Register(RegisterArgs),

    /// Show or change the signed in account
    #[command(subcommand)]
    Account(AccountCommands),

    /// Show a user's profile
    Profile { username: String },

    /// Read and write posts
    #[command(subcommand)]
    Post(PostCommands),

    /// Like a post, or take the like back
    Like { post_id: EntityId },

    /// Comment on a post
    Comment { post_id: EntityId, content: String },

    /// List the comments on a post
    Comments { post_id: EntityId },

    /// Connect with a user, or disconnect
    Connect { user_id: EntityId },

    /// List who liked a post (`like`) or a user's connections (`connections`)
    UserList { content: String, id: EntityId },

    /// Find users by username prefix or exact email
    Search {
        #[arg(default_value = "")]
        query: String,
    },

    /// Send and read direct messages
    #[command(subcommand)]
    Message(MessageCommands),
}

impl Cli {
    fn parse_with_styles() -> Self {
        let command = build_cli_command();
        match command.styles(help_styles()).try_get_matches() {
            Ok(matches) => Cli::from_arg_matches(&matches).unwrap_or_else(|err| err.exit()),
            Err(err) => match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    let _ = print_blank_line_stdout();
                    if let Err(print_err) = err.print()
                        && print_err.kind() != io::ErrorKind::BrokenPipe
                    {
                        eprintln!("Failed to display help: {print_err}");
                    }
                    let _ = print_blank_line_stdout();
                    std::process::exit(0);
                }
                _ => {
                    let exit_code = err.exit_code();
                    let _ = print_blank_line_stderr();
                    if let Err(print_err) = err.print()
                        && print_err.kind() != io::ErrorKind::BrokenPipe
                    {
                        eprintln!("Failed to display error: {print_err}");
                    }
                    let _ = print_blank_line_stderr();
                    std::process::exit(exit_code);
                }
            },
        }
    }
}

fn build_cli_command() -> Command {
    let use_color = detect_color_support();
    let mut command = Cli::command().after_long_help(render_top_level_appendix(use_color));
    command = command.color(if use_color { ColorChoice::Auto } else { ColorChoice::Never });
    for example in command_examples() {
        if let Some(subcommand) = command.find_subcommand_mut(example.name) {
            let updated = subcommand.clone().after_long_help(render_examples(example.groups, use_color));
            *subcommand = updated;
        }
    }
    command
}

fn render_examples(groups: &[ExampleGroup], use_color: bool) -> String {
    let theme = &THEME;
    let mut buffer = String::new();

    let heading = stylize("Examples:", theme.highlight, true, use_color);
    let _ = writeln!(buffer, "{heading}");

    for (index, group) in groups.iter().enumerate() {
        let title = stylize(group.title, theme.primary, true, use_color);
        let _ = writeln!(buffer, "  {title}");

        for command in group.commands {
            let arrow = stylize(ICONS.arrow, theme.secondary, false, use_color);
            let command_text = stylize(command, theme.secondary, false, use_color);
            let _ = writeln!(buffer, "    {arrow} {command_text}");
        }

        if index + 1 < groups.len() {
            buffer.push('\n');
        }
    }

    buffer
}

fn render_top_level_appendix(use_color: bool) -> String {
    let theme = &THEME;
    let mut buffer = String::new();

    let env_heading = stylize("Environment Variables:", theme.highlight, true, use_color);
    let _ = writeln!(buffer, "{env_heading}");
    for (key, description) in ENVIRONMENT_VARIABLES {
        let key_text = stylize(key, theme.key, true, use_color);
        let value_text = stylize(description, theme.value, false, use_color);
        let _ = writeln!(buffer, "  {key_text}  {value_text}");
    }

    buffer.push('\n');

    let tip_heading = stylize("Tip:", theme.highlight, true, use_color);
    let tip_text = stylize(
        "Use 'snugblog <command> --help' to view examples for each command.",
        theme.secondary,
        false,
        use_color,
    );
    let _ = writeln!(buffer, "{tip_heading} {tip_text}");

    buffer
}

fn print_blank_line_stdout() -> io::Result<()> {
    let mut stdout = io::stdout();
    IoWrite::write_all(&mut stdout, b"\n")?;
    IoWrite::flush(&mut stdout)
}

fn print_blank_line_stderr() -> io::Result<()> {
    let mut stderr = io::stderr();
    IoWrite::write_all(&mut stderr, b"\n")?;
    IoWrite::flush(&mut stderr)
}

fn stylize(text: &str, color: ThemeColor, bold: bool, use_color: bool) -> String {
    if !use_color {
        return text.to_string();
    }
    let styled = text.color(color);
    if bold { styled.bold().to_string() } else { styled.to_string() }
}

fn detect_color_support() -> bool {
    ShouldColorize::from_env().should_colorize()
}

fn help_styles() -> Styles {
    let theme = &THEME;
    Styles::styled()
        .usage(style_from_color(theme.primary).bold())
        .header(style_from_color(theme.highlight).bold())
        .literal(style_from_color(theme.secondary))
        .placeholder(style_from_color(theme.muted))
        .valid(style_from_color(theme.success))
        .invalid(style_from_color(theme.warning))
        .error(style_from_color(theme.error).bold())
}

fn style_from_color(color: ThemeColor) -> Style {
    Style::new().fg_color(Some(color_to_clap_color(color)))
}

fn color_to_clap_color(color: ThemeColor) -> ClapColor {
    match color {
        ThemeColor::Black => ClapColor::Ansi(AnsiColor::Black),
        ThemeColor::Red => ClapColor::Ansi(AnsiColor::Red),
        ThemeColor::Green => ClapColor::Ansi(AnsiColor::Green),
        ThemeColor::Yellow => ClapColor::Ansi(AnsiColor::Yellow),
        ThemeColor::Blue => ClapColor::Ansi(AnsiColor::Blue),
        ThemeColor::Magenta => ClapColor::Ansi(AnsiColor::Magenta),
        ThemeColor::Cyan => ClapColor::Ansi(AnsiColor::Cyan),
        ThemeColor::White => ClapColor::Ansi(AnsiColor::White),
        ThemeColor::BrightBlack => ClapColor::Ansi(AnsiColor::BrightBlack),
        ThemeColor::BrightRed => ClapColor::Ansi(AnsiColor::BrightRed),
        ThemeColor::BrightGreen => ClapColor::Ansi(AnsiColor::BrightGreen),
        ThemeColor::BrightYellow => ClapColor::Ansi(AnsiColor::BrightYellow),
        ThemeColor::BrightBlue => ClapColor::Ansi(AnsiColor::BrightBlue),
        ThemeColor::BrightMagenta => ClapColor::Ansi(AnsiColor::BrightMagenta),
        ThemeColor::BrightCyan => ClapColor::Ansi(AnsiColor::BrightCyan),
        ThemeColor::BrightWhite => ClapColor::Ansi(AnsiColor::BrightWhite),
        ThemeColor::TrueColor { r, g, b } => ClapColor::Rgb(RgbColor(r, g, b)),
    }
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let cli = Cli::parse_with_styles();
    let output = OutputManager::new(GlobalOptions {
        output_format: cli.output.clone(),
        quiet: cli.quiet,
        verbose: cli.verbose,
        no_color: cli.no_color,
    });

    if let Err(err) = execute(cli, &output).await {
        output.error(&format!("{err:#}"));
        std::process::exit(1);
    }
}

async fn execute(cli: Cli, output: &OutputManager) -> Result<()> {
    let password = cli.password.clone();
    let connection = ConnectionArgs {
        config: cli.config,
        redis_url: cli.redis_url,
        email: cli.email,
        password: cli.password,
    };
    let ctx = AppContext::open(connection, output).await?;

    match cli.command {
        Commands::Register(args) => handle_register(args, password, &ctx, output).await,
        Commands::Account(command) => handle_account_commands(command, &ctx, output).await,
        Commands::Profile { username } => handle_profile(&username, &ctx, output).await,
        Commands::Post(command) => handle_post_commands(command, &ctx, output).await,
        Commands::Like { post_id } => handle_like(post_id, &ctx, output).await,
        Commands::Comment { post_id, content } => handle_comment(post_id, content, &ctx, output).await,
        Commands::Comments { post_id } => handle_comments(post_id, &ctx, output).await,
        Commands::Connect { user_id } => handle_connect(user_id, &ctx, output).await,
        Commands::UserList { content, id } => handle_user_list(&content, id, &ctx, output).await,
        Commands::Search { query } => handle_search(&query, &ctx, output).await,
        Commands::Message(command) => handle_message_commands(command, &ctx, output).await,
    }
}
