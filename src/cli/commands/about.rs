use crate::cli::utils::{output_json, require_screen};
use crate::cli::OutputFormat;
use crate::context::AppContext;
use crate::screens::ABOUT;
use crate::session::Screen;

pub async fn handle(ctx: &AppContext, output_format: OutputFormat) -> anyhow::Result<()> {
    require_screen(ctx, Screen::About).await?;
    if output_format == OutputFormat::Json {
        return output_json(&ABOUT);
    }

    println!("{}\n", ABOUT.title);
    println!("{}\n", ABOUT.welcome);
    println!("{}", ABOUT.mission);
    for goal in ABOUT.goals {
        println!("  - {}", goal);
    }
    println!("\n{}", ABOUT.closing);
    Ok(())
}
