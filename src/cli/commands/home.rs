use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::context::AppContext;
use crate::screens::{HomeScreen, LoadState};
use crate::session::ScreenSet;

pub async fn handle(ctx: &AppContext, output_format: OutputFormat) -> anyhow::Result<()> {
    let set = ctx.screen_set().await;
    if set == ScreenSet::Entry {
        println!("Welcome to CareNest. Run `carenest auth login <id>` to sign in.");
        return Ok(());
    }

    let home = HomeScreen::load(ctx, set).await;
    if output_format == OutputFormat::Json {
        return output_json(&home);
    }

    println!("{}", home.date_line);
    println!("{}, {}", home.greeting, home.display_name());
    if let Some(user) = &home.user {
        println!("Role: {}   Location: {}", user.role, or_dash(user.orphanage_location.as_deref()));
    }
    if let Some(url) = &home.profile_image {
        println!("Photo: {}", url);
    }

    match &home.notices {
        None => {}
        Some(LoadState::Loaded(notices)) if notices.is_empty() => println!("\nNo notices available"),
        Some(LoadState::Loaded(notices)) => {
            println!("\nLatest notices");
            for notice in notices {
                println!("  [{}] {}", notice.created_display(), notice.message);
            }
        }
        Some(LoadState::Failed(err)) => println!("\nNotices unavailable: {}", err.user_message()),
        Some(LoadState::Loading) => {}
    }
    Ok(())
}
