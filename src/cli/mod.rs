pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::config::config;
use crate::context::AppContext;

#[derive(Parser)]
#[command(name = "carenest")]
#[command(about = "CareNest CLI - orphanage management from the command line")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Sign in, sign out and session status")]
    Auth {
        #[command(subcommand)]
        cmd: commands::auth::AuthCommands,
    },

    #[command(about = "Home screen for the signed-in role")]
    Home,

    #[command(about = "Show the signed-in user's profile")]
    Profile,

    #[command(about = "About CareNest")]
    About,

    #[command(about = "Children directory, registration and absentee log")]
    Children {
        #[command(subcommand)]
        cmd: commands::children::ChildrenCommands,
    },

    #[command(about = "Employee directory and registration (admin)")]
    Employees {
        #[command(subcommand)]
        cmd: commands::employees::EmployeeCommands,
    },

    #[command(about = "Notice board")]
    Notices {
        #[command(subcommand)]
        cmd: commands::notices::NoticeCommands,
    },

    #[command(about = "Meal logs")]
    Food {
        #[command(subcommand)]
        cmd: commands::food::FoodCommands,
    },

    #[command(about = "Attendance report and shift check-in")]
    Attendance {
        #[command(subcommand)]
        cmd: commands::attendance::AttendanceCommands,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let ctx = AppContext::with_file_store(config().clone())?;
    dispatch(cli.command, &ctx, output_format).await
}

/// Run one command against an existing context.
pub async fn dispatch(
    command: Commands,
    ctx: &AppContext,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    match command {
        Commands::Auth { cmd } => commands::auth::handle(cmd, ctx, output_format).await,
        Commands::Home => commands::home::handle(ctx, output_format).await,
        Commands::Profile => commands::profile::handle(ctx, output_format).await,
        Commands::About => commands::about::handle(ctx, output_format).await,
        Commands::Children { cmd } => commands::children::handle(cmd, ctx, output_format).await,
        Commands::Employees { cmd } => commands::employees::handle(cmd, ctx, output_format).await,
        Commands::Notices { cmd } => commands::notices::handle(cmd, ctx, output_format).await,
        Commands::Food { cmd } => commands::food::handle(cmd, ctx, output_format).await,
        Commands::Attendance { cmd } => commands::attendance::handle(cmd, ctx, output_format).await,
    }
}
