mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::json;

use carenest_client::api::PLACEHOLDER_IMAGE;
use carenest_client::screens::{
    AbsenteeLog, AttendanceReport, ChildDirectory, EmployeeDirectory, FoodLogFeed, HomeScreen,
    LoadState, NoticeBoard, ProfileScreen,
};
use carenest_client::session::ScreenSet;
use carenest_client::ClientError;
use common::{ADMIN_ID, EMPLOYEE_ID};

#[tokio::test]
async fn admin_profile_shows_the_signed_in_user() -> Result<()> {
    let api = common::spawn().await?;
    let ctx = api.signed_in(ADMIN_ID).await?;
    assert_eq!(ctx.screen_set().await, ScreenSet::Admin);

    let profile = ProfileScreen::load(&ctx).await;
    let user = profile.user.as_ref().expect("profile user");
    assert_eq!(user.name, "Asha Admin");
    assert_eq!(user.email, "asha@carenest.test");
    assert_eq!(user.orphanage_location.as_deref(), Some("Main Location"));
    assert_eq!(user.phone.as_deref(), Some("9876543210"));
    assert_eq!(
        profile.image.as_deref(),
        Some("https://files.carenest.test/profiles/asha.jpg?sig=abc")
    );
    Ok(())
}

#[tokio::test]
async fn employee_list_failure_is_rendered_not_raised() -> Result<()> {
    let api = common::spawn().await?;
    api.state.respond_with(
        "admin/getEmployees",
        StatusCode::OK,
        json!({ "success": false, "message": "X" }),
    );
    let ctx = api.signed_in(ADMIN_ID).await?;

    let mut directory = EmployeeDirectory::new();
    directory.load(&ctx).await;
    assert_eq!(directory.state, LoadState::Failed(ClientError::api(200, "X")));
    assert!(directory.images.is_empty());
    assert_eq!(api.state.hits("users/getFile"), 0);
    Ok(())
}

#[tokio::test]
async fn employee_directory_resolves_pictures_per_record() -> Result<()> {
    let api = common::spawn().await?;
    let ctx = api.signed_in(ADMIN_ID).await?;

    let mut directory = EmployeeDirectory::new();
    directory.load(&ctx).await;

    let employees = directory.state.loaded().expect("loaded");
    assert_eq!(employees.len(), 2);
    assert_eq!(employees[0].phone.as_deref(), Some("9123456780"));
    assert!(employees[1].phone.is_none());

    assert_eq!(
        directory.images.get("e1"),
        Some("https://files.carenest.test/profiles/eli.jpg?sig=abc")
    );
    assert_eq!(directory.images.url_or_placeholder("e2"), PLACEHOLDER_IMAGE);
    // Only e1 has a picture to resolve.
    assert_eq!(api.state.hits("users/getFile"), 1);
    Ok(())
}

#[tokio::test]
async fn a_failed_picture_does_not_fail_the_directory() -> Result<()> {
    let api = common::spawn().await?;
    let ctx = api.signed_in(ADMIN_ID).await?;

    let mut directory = ChildDirectory::new();
    directory.load(&ctx).await;

    assert_eq!(directory.state.loaded().map(Vec::len), Some(3));
    assert!(directory.images.get("c1").is_some());
    assert!(directory.images.get("c2").is_none());
    assert_eq!(directory.images.get("c3"), None);
    assert_eq!(directory.images.failure("c3"), Some("File not found"));
    assert_eq!(directory.images.failure_count(), 1);
    Ok(())
}

#[tokio::test]
async fn employees_read_the_full_children_listing() -> Result<()> {
    let api = common::spawn().await?;
    let ctx = api.signed_in(EMPLOYEE_ID).await?;

    let mut directory = ChildDirectory::new();
    directory.load(&ctx).await;
    let mut log = AbsenteeLog::new();
    log.load(&ctx).await;

    assert_eq!(directory.state.loaded().map(Vec::len), Some(3));
    assert_eq!(log.visible().len(), 2);
    assert_eq!(api.state.hits("admin/getChildren"), 2);
    Ok(())
}

#[tokio::test]
async fn signed_out_screens_fail_with_missing_token() -> Result<()> {
    let api = common::spawn().await?;
    let ctx = api.context()?;

    let mut directory = ChildDirectory::new();
    directory.load(&ctx).await;
    assert_eq!(
        directory.state,
        LoadState::Failed(ClientError::missing_token())
    );
    assert_eq!(api.state.total_hits(), 0);
    Ok(())
}

#[tokio::test]
async fn absentee_log_filters_by_location_and_clears_after_submit() -> Result<()> {
    let api = common::spawn().await?;
    let ctx = api.signed_in(ADMIN_ID).await?;

    let mut log = AbsenteeLog::new();
    log.load(&ctx).await;
    assert_eq!(log.location(), Some("Main Location"));
    let visible: Vec<&str> = log.visible().iter().map(|c| c.id.as_str()).collect();
    assert_eq!(visible, ["c2"]);

    log.toggle("c2");
    let alert = log.submit(&ctx).await;
    assert!(!alert.is_error);
    assert_eq!(alert.message, "Child log submitted successfully!");
    assert!(log.selected().is_empty());

    assert_eq!(
        api.state.bodies("users/child-log"),
        vec![json!({ "absentees": ["c2"] })]
    );
    Ok(())
}

#[tokio::test]
async fn failed_child_log_keeps_the_selection() -> Result<()> {
    let api = common::spawn().await?;
    api.state.respond_with(
        "users/child-log",
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "success": false, "message": "Log already submitted today" }),
    );
    let ctx = api.signed_in(EMPLOYEE_ID).await?;

    let mut log = AbsenteeLog::new();
    log.load(&ctx).await;
    log.toggle("c1");
    let alert = log.submit(&ctx).await;
    assert!(alert.is_error);
    assert_eq!(alert.message, "Log already submitted today");
    assert_eq!(log.selected(), ["c1".to_string()]);
    Ok(())
}

#[tokio::test]
async fn attendance_is_grouped_by_day_with_pictures_by_employee() -> Result<()> {
    let api = common::spawn().await?;
    let ctx = api.signed_in(ADMIN_ID).await?;

    let mut report = AttendanceReport::new();
    report.load(&ctx).await;

    let days = report.state.loaded().expect("loaded");
    let labels: Vec<&str> = days.iter().map(|d| d.label.as_str()).collect();
    assert_eq!(labels, ["Oct 16", "Oct 15"]);
    let first: Vec<&str> = days[0].records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(first, ["a1", "a3"]);
    assert!(days[0].records[0].is_on_time());
    assert!(!days[0].records[1].is_on_time());
    assert_eq!(days[0].records[0].check_out_display(), "--");

    // e1 appears twice but resolves once.
    assert_eq!(api.state.hits("users/getFile"), 1);
    assert!(report.images.get("e1").is_some());
    assert!(report.images.get("e2").is_none());
    Ok(())
}

#[tokio::test]
async fn food_feed_defaults_servings_and_keys_photos_by_log() -> Result<()> {
    let api = common::spawn().await?;
    let ctx = api.signed_in(ADMIN_ID).await?;

    let mut feed = FoodLogFeed::new();
    feed.load(&ctx).await;

    let logs = feed.state.loaded().expect("loaded");
    assert_eq!(logs[0].servings_or_default(), 1);
    assert_eq!(logs[0].logged_by_name(), "Eli Employee");
    assert_eq!(logs[1].servings_or_default(), 12);
    assert_eq!(logs[1].logged_by_name(), "Unknown");
    assert_eq!(
        feed.images.get("f2"),
        Some("https://files.carenest.test/food/f2.jpg?sig=abc")
    );
    Ok(())
}

#[tokio::test]
async fn notices_accept_a_single_latest_notice() -> Result<()> {
    let api = common::spawn().await?;
    let ctx = api.signed_in(EMPLOYEE_ID).await?;

    let board = NoticeBoard::load(&ctx).await;
    assert_eq!(board.state.loaded().map(Vec::len), Some(2));

    let latest = NoticeBoard::load_latest(&ctx).await;
    let notices = latest.state.loaded().expect("loaded");
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].message, "Staff meeting at 5pm");
    assert_eq!(notices[0].created_display(), "15/10/2026");
    Ok(())
}

#[tokio::test]
async fn employee_home_loads_notices_and_picture() -> Result<()> {
    let api = common::spawn().await?;
    let ctx = api.signed_in(EMPLOYEE_ID).await?;

    let home = HomeScreen::load(&ctx, ScreenSet::Employee).await;
    assert_eq!(home.display_name(), "Eli Employee");
    assert!(home.profile_image.is_some());
    let notices = home.notices.as_ref().and_then(LoadState::loaded).expect("notices");
    assert_eq!(notices.len(), 1);

    let admin = api.signed_in(ADMIN_ID).await?;
    let home = HomeScreen::load(&admin, ScreenSet::Admin).await;
    assert!(home.notices.is_none());
    assert_eq!(api.state.hits("users/latest-notice"), 1);
    Ok(())
}
