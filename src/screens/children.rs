use chrono::NaiveDate;
use serde::Serialize;

use super::state::{Alert, Draft, DraftForm, LoadState, Submission};
use crate::api::files::{resolve_object_urls, ResolvedUrls};
use crate::context::AppContext;
use crate::error::{ClientError, ClientResult};
use crate::models::{Child, NewChild};

/// Choices offered by the add-child form.
pub const LOCATIONS: [&str; 6] = ["Main Location", "1", "2", "3", "4", "5"];
pub const GENDERS: [&str; 3] = ["Male", "Female", "Other"];

const IMAGE_FALLBACK: &str = "Failed to fetch profile image.";

/// Children list plus each child's resolved profile picture.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ChildDirectory {
    pub state: LoadState<Vec<Child>>,
    pub images: ResolvedUrls,
}

impl ChildDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the list, then resolve pictures. Also used to refresh.
    pub async fn load(&mut self, ctx: &AppContext) {
        self.state = LoadState::Loading;
        let result: ClientResult<_> = async {
            let token = ctx.token().await?;
            let children = ctx.client.list_children(&token).await?;
            Ok((token, children))
        }
        .await;

        match result {
            Ok((token, children)) => {
                let refs = children
                    .iter()
                    .map(|c| (c.id.clone(), c.profile_image.clone()));
                self.images = resolve_object_urls(&ctx.client, &token, refs, IMAGE_FALLBACK).await;
                self.state = LoadState::Loaded(children);
            }
            Err(e) => {
                tracing::warn!("failed to load children: {}", e);
                self.state = LoadState::Failed(e);
            }
        }
    }
}

/// Daily absentee register for the signed-in user's location.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AbsenteeLog {
    pub state: LoadState<Vec<Child>>,
    location: Option<String>,
    selected: Vec<String>,
}

impl AbsenteeLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn load(&mut self, ctx: &AppContext) {
        self.state = LoadState::Loading;
        let result: ClientResult<_> = async {
            let session = ctx
                .current_session()
                .await
                .ok_or_else(ClientError::missing_token)?;
            let children = ctx.client.list_children(&session.access_token).await?;
            Ok((session.user.orphanage_location, children))
        }
        .await;

        match result {
            Ok((location, children)) => {
                self.location = location;
                self.state = LoadState::Loaded(children);
            }
            Err(e) => self.state = LoadState::Failed(e),
        }
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Children at the user's location.
    pub fn visible(&self) -> Vec<&Child> {
        self.state
            .loaded()
            .map(|children| {
                children
                    .iter()
                    .filter(|c| c.orphanage_location == self.location)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// `(child, age)` rows for display.
    pub fn rows_on(&self, today: NaiveDate) -> Vec<(&Child, Option<u32>)> {
        self.visible()
            .into_iter()
            .map(|c| (c, c.age_on(today)))
            .collect()
    }

    /// Flip a child between present and absent.
    pub fn toggle(&mut self, child_id: &str) {
        if let Some(pos) = self.selected.iter().position(|id| id == child_id) {
            self.selected.remove(pos);
        } else {
            self.selected.push(child_id.to_string());
        }
    }

    pub fn is_absent(&self, child_id: &str) -> bool {
        self.selected.iter().any(|id| id == child_id)
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    /// Send the absentee ids. The selection is cleared only on success.
    pub async fn submit(&mut self, ctx: &AppContext) -> Alert {
        let result: ClientResult<()> = async {
            let token = ctx.token().await?;
            ctx.client.submit_child_log(&token, &self.selected).await
        }
        .await;

        match result {
            Ok(()) => {
                tracing::info!(absent = self.selected.len(), "child log submitted");
                self.selected.clear();
                Alert::success("Success", "Child log submitted successfully!")
            }
            Err(e) => Alert::from_error(&e),
        }
    }
}

impl Draft for NewChild {
    fn validate(&self) -> ClientResult<()> {
        NewChild::validate(self)
    }
}

pub type AddChildForm = DraftForm<NewChild>;

impl DraftForm<NewChild> {
    pub async fn submit(&self, ctx: &AppContext) -> Submission<Alert> {
        self.submit_with(
            Alert::success("Success", "Child added successfully!"),
            |draft| async move {
                let token = ctx.token().await?;
                ctx.client.add_child(&token, &draft).await
            },
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Child;

    fn child(id: &str, location: Option<&str>) -> Child {
        serde_json::from_value(serde_json::json!({
            "_id": id,
            "name": id,
            "dob": "2015-06-01",
            "orphanageLocation": location,
        }))
        .unwrap()
    }

    fn loaded(location: Option<&str>, children: Vec<Child>) -> AbsenteeLog {
        AbsenteeLog {
            state: LoadState::Loaded(children),
            location: location.map(str::to_string),
            selected: Vec::new(),
        }
    }

    #[test]
    fn only_children_at_the_users_location_are_listed() {
        let log = loaded(
            Some("2"),
            vec![child("a", Some("2")), child("b", Some("3")), child("c", Some("2"))],
        );
        let ids: Vec<&str> = log.visible().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["a", "c"]);

        let today = NaiveDate::from_ymd_opt(2026, 5, 31).unwrap();
        assert_eq!(log.rows_on(today)[0].1, Some(10));
    }

    #[test]
    fn toggling_twice_marks_present_again() {
        let mut log = loaded(Some("1"), vec![child("a", Some("1"))]);
        log.toggle("a");
        assert!(log.is_absent("a"));
        assert_eq!(log.selected(), ["a".to_string()]);
        log.toggle("a");
        assert!(!log.is_absent("a"));
        assert!(log.selected().is_empty());
    }
}
