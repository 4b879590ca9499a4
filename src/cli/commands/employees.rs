use clap::builder::PossibleValuesParser;
use clap::Subcommand;
use std::path::PathBuf;

use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::context::AppContext;
use crate::models::NewEmployee;
use crate::screens::{AddEmployeeForm, EmployeeDirectory, LOCATIONS};
use crate::session::Screen;

#[derive(Subcommand)]
pub enum EmployeeCommands {
    #[command(about = "List employees")]
    List,

    #[command(about = "Register an employee")]
    Add {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long, help = "Phone number")]
        phone: Option<String>,
        #[arg(long, value_parser = PossibleValuesParser::new(LOCATIONS), help = "Orphanage location")]
        location: Option<String>,
        #[arg(long, help = "Profile photo to upload")]
        image: Option<PathBuf>,
    },
}

pub async fn handle(
    cmd: EmployeeCommands,
    ctx: &AppContext,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    match cmd {
        EmployeeCommands::List => {
            require_screen(ctx, Screen::EmployeeDirectory).await?;
            let mut directory = EmployeeDirectory::new();
            directory.load(ctx).await;
            ensure_loaded(&directory.state)?;
            if output_format == OutputFormat::Json {
                return output_json(&directory);
            }

            let employees = loaded(directory.state.clone())?;
            if employees.is_empty() {
                return output_empty_collection(&output_format, "employees", "No employees found");
            }

            println!("{:<12} {:<22} {:<28} {:<14} {}", "UNIQUE ID", "NAME", "EMAIL", "PHONE", "LOCATION");
            println!("{}", "-".repeat(90));
            for employee in &employees {
                println!(
                    "{:<12} {:<22} {:<28} {:<14} {}",
                    or_dash(employee.unique_id_number.as_deref()),
                    employee.name,
                    employee.email,
                    or_dash(employee.phone.as_deref()),
                    or_dash(employee.orphanage_location.as_deref()),
                );
            }
            Ok(())
        }
        EmployeeCommands::Add {
            name,
            email,
            phone,
            location,
            image,
        } => {
            require_screen(ctx, Screen::AddEmployee).await?;
            let form = AddEmployeeForm::new(NewEmployee {
                name: name.unwrap_or_default(),
                email: email.unwrap_or_default(),
                phone: phone.unwrap_or_default(),
                orphanage_location: location.unwrap_or_default(),
                image,
            });
            finish_alert(&output_format, form.submit(ctx).await)
        }
    }
}
