use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};

use super::state::{Alert, LoadState, SubmitGuard, Submission};
use crate::api::files::{resolve_object_urls, ResolvedUrls};
use crate::context::AppContext;
use crate::error::ClientResult;
use crate::models::{group_by_day, AttendanceDay};

/// Employee attendance grouped by day; pictures keyed by employee id.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AttendanceReport {
    pub state: LoadState<Vec<AttendanceDay>>,
    pub images: ResolvedUrls,
}

impl AttendanceReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn load(&mut self, ctx: &AppContext) {
        self.state = LoadState::Loading;
        let result: ClientResult<_> = async {
            let token = ctx.token().await?;
            let records = ctx.client.list_attendance(&token).await?;
            Ok((token, records))
        }
        .await;

        match result {
            Ok((token, records)) => {
                let refs: Vec<_> = records
                    .iter()
                    .map(|r| (r.employee.id.clone(), r.employee.profile_image.clone()))
                    .collect();
                self.images =
                    resolve_object_urls(&ctx.client, &token, refs, "Failed to fetch profile image.")
                        .await;
                self.state = LoadState::Loaded(group_by_day(records));
            }
            Err(e) => {
                tracing::warn!("failed to load attendance: {}", e);
                self.state = LoadState::Failed(e);
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ShiftAction {
    CheckIn,
    CheckOut,
}

impl ShiftAction {
    pub fn label(&self) -> &'static str {
        match self {
            ShiftAction::CheckIn => "Check in",
            ShiftAction::CheckOut => "Check out",
        }
    }
}

/// Check-in/check-out toggle. The checked-in flag lives only in this panel;
/// the server is not asked for it.
#[derive(Debug, Default)]
pub struct CheckInPanel {
    checked_in: AtomicBool,
    guard: SubmitGuard,
}

impl CheckInPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_checked_in(&self) -> bool {
        self.checked_in.load(Ordering::Acquire)
    }

    pub fn is_submitting(&self) -> bool {
        self.guard.is_busy()
    }

    /// The action the button currently offers.
    pub fn next_action(&self) -> ShiftAction {
        if self.is_checked_in() {
            ShiftAction::CheckOut
        } else {
            ShiftAction::CheckIn
        }
    }

    pub async fn toggle(&self, ctx: &AppContext) -> Submission<Alert> {
        self.perform(ctx, self.next_action()).await
    }

    /// Run `action`; the flag only flips once the server accepts it.
    pub async fn perform(&self, ctx: &AppContext, action: ShiftAction) -> Submission<Alert> {
        let Some(_ticket) = self.guard.try_begin() else {
            return Submission::Busy;
        };

        let result: ClientResult<()> = async {
            let token = ctx.token().await?;
            match action {
                ShiftAction::CheckIn => ctx.client.check_in(&token).await,
                ShiftAction::CheckOut => ctx.client.check_out(&token).await,
            }
        }
        .await;

        let alert = match result {
            Ok(()) => match action {
                ShiftAction::CheckIn => {
                    self.checked_in.store(true, Ordering::Release);
                    Alert::success("Success", "You have checked in.")
                }
                ShiftAction::CheckOut => {
                    self.checked_in.store(false, Ordering::Release);
                    Alert::success("Success", "You have checked out.")
                }
            },
            Err(e) => {
                tracing::warn!(action = action.label(), "attendance action failed: {}", e);
                Alert::from_error(&e)
            }
        };
        Submission::Done(alert)
    }
}
