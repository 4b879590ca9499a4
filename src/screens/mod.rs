//! View-models for every screen of the app.
//!
//! Each screen owns its state; nothing is shared between screens except the
//! session reached through [`AppContext`](crate::context::AppContext).

pub mod about;
pub mod attendance;
pub mod children;
pub mod employees;
pub mod food;
pub mod home;
pub mod notices;
pub mod profile;
pub mod sign_in;
pub mod state;

pub use about::{AboutScreen, ABOUT};
pub use attendance::{AttendanceReport, CheckInPanel, ShiftAction};
pub use children::{AbsenteeLog, AddChildForm, ChildDirectory, GENDERS, LOCATIONS};
pub use employees::{AddEmployeeForm, EmployeeDirectory};
pub use food::{FoodLogFeed, MealLoggerForm};
pub use home::{date_line, greeting, HomeScreen};
pub use notices::{AddNoticeForm, NoticeBoard};
pub use profile::ProfileScreen;
pub use sign_in::{SignInOutcome, SignInScreen};
pub use state::{Alert, Draft, DraftForm, LoadState, SubmitGuard, SubmitTicket, Submission};
