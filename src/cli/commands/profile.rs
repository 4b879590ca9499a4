use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::context::AppContext;
use crate::screens::ProfileScreen;
use crate::session::Screen;

pub async fn handle(ctx: &AppContext, output_format: OutputFormat) -> anyhow::Result<()> {
    require_screen(ctx, Screen::Profile).await?;
    let profile = ProfileScreen::load(ctx).await;
    let Some(user) = profile.user.as_ref() else {
        return Err(anyhow::anyhow!("Not signed in"));
    };

    match output_format {
        OutputFormat::Json => output_json(&profile),
        OutputFormat::Text => {
            println!("Name:      {}", user.display_name());
            println!("Email:     {}", user.email);
            println!("Role:      {}", user.role);
            println!("Unique ID: {}", or_dash(user.unique_id_number.as_deref()));
            println!("Phone:     {}", or_dash(user.phone.as_deref()));
            println!("Location:  {}", or_dash(user.orphanage_location.as_deref()));
            match (&profile.image, &profile.image_error) {
                (Some(url), _) => println!("Photo:     {}", url),
                (None, Some(reason)) => println!("Photo:     unavailable ({})", reason),
                (None, None) => {}
            }
            Ok(())
        }
    }
}
