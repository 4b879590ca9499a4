use clap::Subcommand;
use std::path::PathBuf;

use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::context::AppContext;
use crate::models::{display_date, MealType, NewFoodLog};
use crate::screens::{FoodLogFeed, MealLoggerForm};
use crate::session::Screen;

#[derive(Subcommand)]
pub enum FoodCommands {
    #[command(about = "List meal logs (admin)")]
    List,

    #[command(about = "Log a meal with a photo (employee)")]
    Add {
        #[arg(long, help = "Breakfast, Lunch, Dinner or Snacks")]
        meal: Option<MealType>,
        #[arg(long, help = "Number of servings")]
        servings: Option<String>,
        #[arg(long, help = "Photo of the meal")]
        image: Option<PathBuf>,
    },
}

pub async fn handle(
    cmd: FoodCommands,
    ctx: &AppContext,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    match cmd {
        FoodCommands::List => {
            require_screen(ctx, Screen::FoodLogFeed).await?;
            let mut feed = FoodLogFeed::new();
            feed.load(ctx).await;
            ensure_loaded(&feed.state)?;
            if output_format == OutputFormat::Json {
                return output_json(&feed);
            }

            let logs = loaded(feed.state.clone())?;
            if logs.is_empty() {
                return output_empty_collection(&output_format, "food_logs", "No food logs found");
            }

            println!("{:<10} {:<9} {:<20} {:<14} {:<12} {}", "MEAL", "SERVINGS", "LOGGED BY", "LOCATION", "DATE", "PHOTO");
            println!("{}", "-".repeat(100));
            for log in &logs {
                println!(
                    "{:<10} {:<9} {:<20} {:<14} {:<12} {}",
                    log.meal_type,
                    log.servings_or_default(),
                    log.logged_by_name(),
                    or_dash(log.orphanage_location.as_deref()),
                    log.time_logged.as_deref().map(display_date).unwrap_or_default(),
                    feed.images.url_or_placeholder(&log.id),
                );
            }
            Ok(())
        }
        FoodCommands::Add {
            meal,
            servings,
            image,
        } => {
            require_screen(ctx, Screen::MealLogger).await?;
            let form = MealLoggerForm::new(NewFoodLog {
                meal_type: meal,
                servings: servings.unwrap_or_default(),
                image,
            });
            finish_alert(&output_format, form.submit(ctx).await)
        }
    }
}
