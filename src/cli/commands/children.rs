use chrono::Local;
use clap::builder::PossibleValuesParser;
use clap::Subcommand;
use serde_json::json;
use std::path::PathBuf;

use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::context::AppContext;
use crate::models::{display_date, NewChild};
use crate::screens::{AbsenteeLog, AddChildForm, ChildDirectory, GENDERS, LOCATIONS};
use crate::session::Screen;

#[derive(Subcommand)]
pub enum ChildrenCommands {
    #[command(about = "List children")]
    List,

    #[command(about = "Register a child (employee)")]
    Add {
        #[arg(long, help = "Full name")]
        name: Option<String>,
        #[arg(long, help = "Date of birth (DD/MM/YYYY)")]
        dob: Option<String>,
        #[arg(long, value_parser = PossibleValuesParser::new(GENDERS))]
        gender: Option<String>,
        #[arg(long, value_parser = PossibleValuesParser::new(LOCATIONS), help = "Orphanage location")]
        location: Option<String>,
        #[arg(long, help = "Education level")]
        education: Option<String>,
        #[arg(long, help = "Disability, if any")]
        disability: Option<String>,
        #[arg(long, help = "Profile photo to upload")]
        image: Option<PathBuf>,
    },

    #[command(about = "Show today's register and optionally submit absentees")]
    Absentees {
        #[arg(long = "absent", help = "Child id to mark absent (repeatable); submits the log")]
        absent: Vec<String>,
    },
}

pub async fn handle(
    cmd: ChildrenCommands,
    ctx: &AppContext,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    match cmd {
        ChildrenCommands::List => {
            require_screen(ctx, Screen::ChildDirectory).await?;

            let mut directory = ChildDirectory::new();
            directory.load(ctx).await;
            ensure_loaded(&directory.state)?;
            if output_format == OutputFormat::Json {
                return output_json(&directory);
            }

            let children = loaded(directory.state.clone())?;
            if children.is_empty() {
                return output_empty_collection(&output_format, "children", "No children found");
            }

            println!("{:<26} {:<22} {:<12} {:<8} {:<16} {}", "ID", "NAME", "DOB", "GENDER", "LEVEL", "LOCATION");
            println!("{}", "-".repeat(100));
            for child in &children {
                println!(
                    "{:<26} {:<22} {:<12} {:<8} {:<16} {}",
                    child.id,
                    child.name,
                    display_date(&child.dob),
                    child.gender,
                    or_dash(Some(child.education_level.as_str())),
                    or_dash(child.orphanage_location.as_deref()),
                );
            }
            Ok(())
        }
        ChildrenCommands::Add {
            name,
            dob,
            gender,
            location,
            education,
            disability,
            image,
        } => {
            require_screen(ctx, Screen::AddChild).await?;
            let form = AddChildForm::new(NewChild {
                name: name.unwrap_or_default(),
                dob: dob.unwrap_or_default(),
                gender: gender.unwrap_or_default(),
                orphanage_location: location.unwrap_or_default(),
                education_level: education.unwrap_or_default(),
                disability: disability.unwrap_or_default(),
                image,
            });
            finish_alert(&output_format, form.submit(ctx).await)
        }
        ChildrenCommands::Absentees { absent } => {
            require_screen(ctx, Screen::AbsenteeLog).await?;
            let mut log = AbsenteeLog::new();
            log.load(ctx).await;
            ensure_loaded(&log.state)?;

            if absent.is_empty() {
                let today = Local::now().date_naive();
                let rows = log.rows_on(today);
                match output_format {
                    OutputFormat::Json => {
                        let rows: Vec<_> = rows
                            .iter()
                            .map(|(child, age)| json!({ "child": child, "age": age }))
                            .collect();
                        return output_json(&json!({ "location": log.location(), "children": rows }));
                    }
                    OutputFormat::Text => {
                        if rows.is_empty() {
                            println!("No children at {}", or_dash(log.location()));
                            return Ok(());
                        }
                        println!("{:<26} {:<22} {}", "ID", "NAME", "AGE");
                        println!("{}", "-".repeat(54));
                        for (child, age) in rows {
                            let age = age.map(|a| a.to_string()).unwrap_or_else(|| "-".to_string());
                            println!("{:<26} {:<22} {}", child.id, child.name, age);
                        }
                        return Ok(());
                    }
                }
            }

            for id in &absent {
                if !log.visible().iter().any(|c| &c.id == id) {
                    tracing::warn!(child = %id, "not a child at this location; marking anyway");
                }
                if !log.is_absent(id) {
                    log.toggle(id);
                }
            }
            let alert = log.submit(ctx).await;
            if alert.is_error {
                return Err(CommandFailure::from(alert).into());
            }
            output_success(&output_format, &alert.message, Some(json!({ "absentees": absent })))
        }
    }
}
