use serde::Serialize;

use crate::api::files::resolve_object_urls;
use crate::context::AppContext;
use crate::error::ClientResult;
use crate::models::User;
use crate::session::ScreenSet;

/// Signed-in user's details with their resolved profile picture.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileScreen {
    pub user: Option<User>,
    pub image: Option<String>,
    pub image_error: Option<String>,
}

impl ProfileScreen {
    pub async fn load(ctx: &AppContext) -> Self {
        let Some(session) = ctx.current_session().await else {
            return Self::default();
        };

        let user_id = session.user.id.clone().unwrap_or_default();
        let images = resolve_object_urls(
            &ctx.client,
            &session.access_token,
            [(user_id.clone(), session.user.profile_image.clone())],
            "Failed to fetch profile image.",
        )
        .await;

        Self {
            image: images.get(&user_id).map(str::to_string),
            image_error: images.failure(&user_id).map(str::to_string),
            user: Some(session.user),
        }
    }

    /// Clear the session; the caller lands on the entry set.
    pub async fn logout(ctx: &AppContext) -> ClientResult<ScreenSet> {
        ctx.session.sign_out().await?;
        Ok(ScreenSet::Entry)
    }
}
