use serde::Serialize;

use super::state::{Alert, Draft, DraftForm, LoadState, Submission};
use crate::api::files::{resolve_object_urls, ResolvedUrls};
use crate::context::AppContext;
use crate::error::ClientResult;
use crate::models::{Employee, NewEmployee};

#[derive(Debug, Clone, Default, Serialize)]
pub struct EmployeeDirectory {
    pub state: LoadState<Vec<Employee>>,
    pub images: ResolvedUrls,
}

impl EmployeeDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// A `success: false` reply shows its message in place of the list.
    pub async fn load(&mut self, ctx: &AppContext) {
        self.state = LoadState::Loading;
        let result: ClientResult<_> = async {
            let token = ctx.token().await?;
            let employees = ctx.client.list_employees(&token).await?;
            Ok((token, employees))
        }
        .await;

        match result {
            Ok((token, employees)) => {
                let refs = employees
                    .iter()
                    .map(|e| (e.id.clone(), e.profile_image.clone()));
                self.images =
                    resolve_object_urls(&ctx.client, &token, refs, "Failed to fetch profile image.")
                        .await;
                self.state = LoadState::Loaded(employees);
            }
            Err(e) => {
                tracing::warn!("failed to load employees: {}", e);
                self.state = LoadState::Failed(e);
            }
        }
    }
}

impl Draft for NewEmployee {
    fn validate(&self) -> ClientResult<()> {
        NewEmployee::validate(self)
    }
}

pub type AddEmployeeForm = DraftForm<NewEmployee>;

impl DraftForm<NewEmployee> {
    pub async fn submit(&self, ctx: &AppContext) -> Submission<Alert> {
        self.submit_with(
            Alert::success("Success", "Employee added successfully!"),
            |draft| async move {
                let token = ctx.token().await?;
                ctx.client.add_employee(&token, &draft).await
            },
        )
        .await
    }
}
