use serde::Serialize;
use serde_json::{json, Value};
use std::io::{self, BufRead, Write};
use thiserror::Error;

use crate::cli::OutputFormat;
use crate::context::AppContext;
use crate::error::ClientError;
use crate::screens::{Alert, LoadState, Submission};
use crate::session::{Gate, Screen, ScreenSet};

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: &OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let (Some(target), Some(Value::Object(extra))) = (response.as_object_mut(), data) {
                target.extend(extra);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output an error message in the appropriate format
pub fn output_error(
    output_format: &OutputFormat,
    message: &str,
    error_code: Option<&str>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": false,
                "error": message
            });

            if let Some(code) = error_code {
                response["error_code"] = json!(code);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            eprintln!("Error: {}", message);
        }
    }
    Ok(())
}

/// Output an empty collection in the appropriate format
pub fn output_empty_collection(
    output_format: &OutputFormat,
    collection_name: &str,
    message: &str,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json!({
                collection_name: []
            }))?);
        }
        OutputFormat::Text => {
            println!("{}", message);
        }
    }
    Ok(())
}

pub fn output_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Role check before a protected command runs.
pub async fn require_screen(ctx: &AppContext, screen: Screen) -> anyhow::Result<ScreenSet> {
    match ctx.enter(screen).await {
        Gate::Enter(set) => Ok(set),
        Gate::RedirectToEntry => match ctx.screen_set().await {
            ScreenSet::Entry => Err(anyhow::anyhow!(
                "Not signed in. Run `carenest auth login <id>` first"
            )),
            set => Err(anyhow::anyhow!("{:?} accounts cannot open this screen", set)),
        },
    }
}

/// An error alert raised as the command's failure.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct CommandFailure {
    pub message: String,
    pub code: Option<&'static str>,
}

impl From<Alert> for CommandFailure {
    fn from(alert: Alert) -> Self {
        Self {
            message: alert.message,
            code: alert.error_code,
        }
    }
}

/// Unwrap a loaded screen, turning a failed load into the command's error.
pub fn loaded<T>(state: LoadState<T>) -> anyhow::Result<T> {
    match state {
        LoadState::Loaded(value) => Ok(value),
        LoadState::Failed(err) => Err(err.into()),
        LoadState::Loading => Err(anyhow::anyhow!("screen did not finish loading")),
    }
}

/// Fail the command when the screen did not load, whatever the output format.
pub fn ensure_loaded<T>(state: &LoadState<T>) -> anyhow::Result<()> {
    match state {
        LoadState::Loaded(_) => Ok(()),
        LoadState::Failed(err) => Err(err.clone().into()),
        LoadState::Loading => Err(anyhow::anyhow!("screen did not finish loading")),
    }
}

/// Report the alert raised by an action; error alerts fail the command.
pub fn finish_alert(
    output_format: &OutputFormat,
    submission: Submission<Alert>,
) -> anyhow::Result<()> {
    match submission {
        Submission::Busy => Err(anyhow::anyhow!("Another submission is still in progress")),
        Submission::Done(alert) if alert.is_error => Err(CommandFailure::from(alert).into()),
        Submission::Done(alert) => output_success(output_format, &alert.message, None),
    }
}

/// Error code for JSON output when the failure came from the client library.
pub fn error_code(err: &anyhow::Error) -> Option<&'static str> {
    if let Some(client) = err.downcast_ref::<ClientError>() {
        return Some(client.error_code());
    }
    err.downcast_ref::<CommandFailure>().and_then(|failure| failure.code)
}

/// Read one line from stdin after printing `label`.
pub fn prompt(label: &str) -> anyhow::Result<String> {
    eprint!("{}", label);
    io::stderr().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

pub fn or_dash(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => "-",
    }
}
