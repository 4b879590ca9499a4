use serde::Serialize;

use super::state::{Alert, Draft, DraftForm, LoadState, Submission};
use crate::api::files::{resolve_object_urls, ResolvedUrls};
use crate::context::AppContext;
use crate::error::{ClientError, ClientResult};
use crate::models::{FoodLog, NewFoodLog};

/// Meal logs with their photos, keyed by food-log id.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FoodLogFeed {
    pub state: LoadState<Vec<FoodLog>>,
    pub images: ResolvedUrls,
}

impl FoodLogFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn load(&mut self, ctx: &AppContext) {
        self.state = LoadState::Loading;
        let result: ClientResult<_> = async {
            let token = ctx.token().await?;
            let logs = ctx.client.list_food_logs(&token).await?;
            Ok((token, logs))
        }
        .await;

        match result {
            Ok((token, logs)) => {
                let refs = logs.iter().map(|l| (l.id.clone(), l.food_photo.clone()));
                self.images =
                    resolve_object_urls(&ctx.client, &token, refs, "Failed to fetch food image.").await;
                self.state = LoadState::Loaded(logs);
            }
            Err(e) => {
                tracing::warn!("failed to load food logs: {}", e);
                self.state = LoadState::Failed(e);
            }
        }
    }
}

impl Draft for NewFoodLog {
    fn validate(&self) -> ClientResult<()> {
        NewFoodLog::validate(self)
    }
}

pub type MealLoggerForm = DraftForm<NewFoodLog>;

impl DraftForm<NewFoodLog> {
    /// The meal is filed under the signed-in user's location.
    pub async fn submit(&self, ctx: &AppContext) -> Submission<Alert> {
        self.submit_with(
            Alert::success("Success", "Meal log saved successfully!"),
            |draft| async move {
                let session = ctx
                    .current_session()
                    .await
                    .ok_or_else(ClientError::missing_token_or_user)?;
                let location = session.user.orphanage_location.clone().unwrap_or_default();
                ctx.client
                    .add_food_log(&session.access_token, &draft, &location)
                    .await
            },
        )
        .await
    }
}
