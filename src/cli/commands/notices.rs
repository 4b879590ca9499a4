use clap::Subcommand;

use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::context::AppContext;
use crate::models::NewNotice;
use crate::screens::{AddNoticeForm, NoticeBoard};
use crate::session::Screen;

#[derive(Subcommand)]
pub enum NoticeCommands {
    #[command(about = "List all notices")]
    List,

    #[command(about = "Show the latest notices")]
    Latest,

    #[command(about = "Publish a notice (admin)")]
    Add {
        #[arg(help = "Notice text")]
        message: String,
    },
}

pub async fn handle(
    cmd: NoticeCommands,
    ctx: &AppContext,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    match cmd {
        NoticeCommands::List => list(ctx, output_format, false).await,
        NoticeCommands::Latest => list(ctx, output_format, true).await,
        NoticeCommands::Add { message } => {
            require_screen(ctx, Screen::AddNotice).await?;
            let form = AddNoticeForm::new(NewNotice { message });
            finish_alert(&output_format, form.submit(ctx).await)
        }
    }
}

async fn list(ctx: &AppContext, output_format: OutputFormat, latest: bool) -> anyhow::Result<()> {
    require_screen(ctx, Screen::NoticeBoard).await?;
    let board = if latest {
        NoticeBoard::load_latest(ctx).await
    } else {
        NoticeBoard::load(ctx).await
    };
    ensure_loaded(&board.state)?;
    if output_format == OutputFormat::Json {
        return output_json(&board);
    }

    let notices = loaded(board.state)?;
    if notices.is_empty() {
        return output_empty_collection(&output_format, "notices", "No notices available");
    }
    for notice in &notices {
        println!("[{}] {}", notice.created_display(), notice.message);
    }
    Ok(())
}
