use chrono::Utc;
use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::context::AppContext;
use crate::screens::{ProfileScreen, SignInScreen, Submission};
use crate::session::{authorize, token_expiry};

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Sign in with a unique ID number")]
    Login {
        #[arg(help = "Unique ID number")]
        identifier: String,
        #[arg(long, help = "Password (will prompt if not provided)")]
        password: Option<String>,
    },

    #[command(about = "Sign out and clear the stored session")]
    Logout,

    #[command(about = "Show current authentication status")]
    Status,

    #[command(about = "Show current user information")]
    Whoami,
}

pub async fn handle(
    cmd: AuthCommands,
    ctx: &AppContext,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    match cmd {
        AuthCommands::Login { identifier, password } => {
            let password = match password {
                Some(p) => p,
                None => prompt("Password: ")?,
            };

            let outcome = match SignInScreen::new().submit(ctx, &identifier, &password).await {
                Submission::Done(outcome) => outcome,
                Submission::Busy => return Err(anyhow::anyhow!("Sign-in already in progress")),
            };
            if outcome.alert.is_error {
                return Err(CommandFailure::from(outcome.alert).into());
            }

            output_success(
                &output_format,
                &outcome.alert.message,
                Some(json!({ "screen_set": outcome.destination })),
            )
        }
        AuthCommands::Logout => {
            ProfileScreen::logout(ctx).await?;
            output_success(&output_format, "Signed out", None)
        }
        AuthCommands::Status => {
            let session = ctx.current_session().await;
            let set = authorize(session.as_ref());
            let expires_at = session
                .as_ref()
                .and_then(|s| token_expiry(&s.access_token));

            match output_format {
                OutputFormat::Json => output_json(&json!({
                    "authenticated": session.is_some(),
                    "screen_set": set,
                    "role": session.as_ref().map(|s| s.user.role.to_string()),
                    "expires_at": expires_at,
                    "expired": expires_at.map(|exp| exp <= Utc::now()),
                })),
                OutputFormat::Text => {
                    let Some(session) = session else {
                        println!("Not signed in");
                        return Ok(());
                    };
                    println!("Signed in as {} ({})", session.user.display_name(), session.user.role);
                    println!("Screen set: {:?}", set);
                    match expires_at {
                        Some(exp) if exp <= Utc::now() => {
                            println!("Token expired at {}", exp.format("%Y-%m-%d %H:%M UTC"))
                        }
                        Some(exp) => println!("Token expires at {}", exp.format("%Y-%m-%d %H:%M UTC")),
                        None => println!("Token expiry unknown"),
                    }
                    Ok(())
                }
            }
        }
        AuthCommands::Whoami => {
            let profile = ProfileScreen::load(ctx).await;
            let Some(user) = profile.user.as_ref() else {
                return Err(anyhow::anyhow!("Not signed in"));
            };
            match output_format {
                OutputFormat::Json => output_json(user),
                OutputFormat::Text => {
                    println!("{} <{}> ({})", user.display_name(), user.email, user.role);
                    Ok(())
                }
            }
        }
    }
}
