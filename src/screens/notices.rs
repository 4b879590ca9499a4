use serde::Serialize;

use super::state::{Alert, Draft, DraftForm, LoadState, Submission};
use crate::context::AppContext;
use crate::error::ClientResult;
use crate::models::{NewNotice, Notice};

/// Every notice, newest first as the server orders them.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NoticeBoard {
    pub state: LoadState<Vec<Notice>>,
}

impl NoticeBoard {
    pub async fn load(ctx: &AppContext) -> Self {
        let result: ClientResult<Vec<Notice>> = async {
            let token = ctx.token().await?;
            ctx.client.list_notices(&token).await
        }
        .await;
        Self {
            state: LoadState::from_result(result),
        }
    }

    /// Only the most recent notices.
    pub async fn load_latest(ctx: &AppContext) -> Self {
        let result: ClientResult<Vec<Notice>> = async {
            let token = ctx.token().await?;
            ctx.client.latest_notices(&token).await
        }
        .await;
        Self {
            state: LoadState::from_result(result),
        }
    }
}

impl Draft for NewNotice {
    fn validate(&self) -> ClientResult<()> {
        NewNotice::validate(self)
    }
}

pub type AddNoticeForm = DraftForm<NewNotice>;

impl DraftForm<NewNotice> {
    pub async fn submit(&self, ctx: &AppContext) -> Submission<Alert> {
        self.submit_with(
            Alert::success("Success", "Notice added successfully!"),
            |draft| async move {
                let token = ctx.token().await?;
                ctx.client.add_notice(&token, &draft).await
            },
        )
        .await
    }
}
