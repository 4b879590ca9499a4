use clap::Subcommand;

use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::context::AppContext;
use crate::screens::{AttendanceReport, CheckInPanel, ShiftAction};
use crate::session::Screen;

#[derive(Subcommand)]
pub enum AttendanceCommands {
    #[command(about = "Employee attendance grouped by day (admin)")]
    List,

    #[command(about = "Check in for a shift (employee)")]
    CheckIn,

    #[command(about = "Check out of a shift (employee)")]
    CheckOut,
}

pub async fn handle(
    cmd: AttendanceCommands,
    ctx: &AppContext,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let action = match cmd {
        AttendanceCommands::List => return list(ctx, output_format).await,
        AttendanceCommands::CheckIn => ShiftAction::CheckIn,
        AttendanceCommands::CheckOut => ShiftAction::CheckOut,
    };

    require_screen(ctx, Screen::CheckIn).await?;
    let panel = CheckInPanel::new();
    finish_alert(&output_format, panel.perform(ctx, action).await)
}

async fn list(ctx: &AppContext, output_format: OutputFormat) -> anyhow::Result<()> {
    require_screen(ctx, Screen::AttendanceReport).await?;
    let mut report = AttendanceReport::new();
    report.load(ctx).await;
    ensure_loaded(&report.state)?;
    if output_format == OutputFormat::Json {
        return output_json(&report);
    }

    let days = loaded(report.state)?;
    if days.is_empty() {
        return output_empty_collection(&output_format, "attendance", "No attendance records found");
    }

    for day in &days {
        println!("{}", day.label);
        for record in &day.records {
            let marker = if record.is_on_time() { "✓" } else { "!" };
            println!(
                "  {} {:<22} in {:<6} out {:<6} {}",
                marker,
                record.employee.name,
                record.check_in_display(),
                record.check_out_display(),
                record.status,
            );
        }
    }
    Ok(())
}
