use serde::Serialize;

use super::state::{Alert, SubmitGuard, Submission};
use crate::context::AppContext;
use crate::session::{authorize, ScreenSet};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignInOutcome {
    pub alert: Alert,
    /// Where the user lands next; `Entry` on failure or an unrecognized role.
    pub destination: ScreenSet,
}

#[derive(Debug, Default)]
pub struct SignInScreen {
    guard: SubmitGuard,
}

impl SignInScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_submitting(&self) -> bool {
        self.guard.is_busy()
    }

    pub async fn submit(
        &self,
        ctx: &AppContext,
        identifier: &str,
        secret: &str,
    ) -> Submission<SignInOutcome> {
        let Some(_ticket) = self.guard.try_begin() else {
            return Submission::Busy;
        };

        let outcome = match ctx.session.sign_in(&ctx.client, identifier, secret).await {
            Ok(session) => SignInOutcome {
                alert: Alert::success(
                    "Login Successful",
                    format!("Welcome, {}!", session.user.display_name()),
                ),
                destination: authorize(Some(&session)),
            },
            Err(e) if e.is_validation() => SignInOutcome {
                alert: Alert::from_error(&e),
                destination: ScreenSet::Entry,
            },
            Err(e) => SignInOutcome {
                alert: Alert::failure("Login Failed", e.user_message()).with_code(e.error_code()),
                destination: ScreenSet::Entry,
            },
        };
        Submission::Done(outcome)
    }
}
