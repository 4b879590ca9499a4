use chrono::{NaiveDate, Timelike};
use serde::Serialize;

use super::state::LoadState;
use crate::api::files::resolve_object_urls;
use crate::context::AppContext;
use crate::models::{Notice, User};
use crate::session::ScreenSet;

/// Salutation for the hour of day (0-23).
pub fn greeting(hour: u32) -> &'static str {
    match hour {
        5..=11 => "Good Morning",
        12..=16 => "Good Afternoon",
        17..=20 => "Good Evening",
        _ => "Good Night",
    }
}

/// Header date, e.g. `16 OCTOBER 2026`.
pub fn date_line(date: NaiveDate) -> String {
    date.format("%-d %B %Y").to_string().to_uppercase()
}

/// Landing screen of the admin and employee sets.
#[derive(Debug, Clone, Serialize)]
pub struct HomeScreen {
    pub set: ScreenSet,
    pub greeting: String,
    pub date_line: String,
    pub user: Option<User>,
    pub profile_image: Option<String>,
    /// Latest notices; only the employee home shows them.
    pub notices: Option<LoadState<Vec<Notice>>>,
}

impl HomeScreen {
    pub async fn load(ctx: &AppContext, set: ScreenSet) -> Self {
        let now = chrono::Local::now();
        let mut screen = Self {
            set,
            greeting: greeting(now.hour()).to_string(),
            date_line: date_line(now.date_naive()),
            user: None,
            profile_image: None,
            notices: None,
        };

        let session = ctx.current_session().await;
        screen.user = session.as_ref().map(|s| s.user.clone());
        if set != ScreenSet::Employee {
            return screen;
        }

        let Some(session) = session else {
            screen.notices = Some(LoadState::Failed(crate::error::ClientError::missing_token()));
            return screen;
        };

        let token = session.access_token.as_str();
        let user_id = session.user.id.clone().unwrap_or_default();
        let image_ref = session.user.profile_image.clone();

        let (notices, images) = tokio::join!(
            ctx.client.latest_notices(token),
            resolve_object_urls(
                &ctx.client,
                token,
                [(user_id.clone(), image_ref)],
                "Failed to fetch profile image.",
            ),
        );

        screen.notices = Some(LoadState::from_result(notices));
        screen.profile_image = images.get(&user_id).map(str::to_string);
        screen
    }

    pub fn display_name(&self) -> &str {
        self.user.as_ref().map(User::display_name).unwrap_or("Guest")
    }
}
