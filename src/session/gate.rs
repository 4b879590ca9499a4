//! Role gate: which screen set a session may see.

use serde::Serialize;

use super::manager::Session;
use crate::models::Role;

/// Disjoint groups of screens. `Entry` is the unauthenticated landing set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ScreenSet {
    Entry,
    Admin,
    Employee,
}

/// Map a session to the screen set it may see. Absent sessions and roles
/// other than exactly `Admin` or `Employee` land on `Entry`.
pub fn authorize(session: Option<&Session>) -> ScreenSet {
    match session.map(|s| &s.user.role) {
        Some(Role::Admin) => ScreenSet::Admin,
        Some(Role::Employee) => ScreenSet::Employee,
        _ => ScreenSet::Entry,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Screen {
    Entry,
    SignIn,
    AdminHome,
    EmployeeHome,
    Profile,
    About,
    ChildDirectory,
    AbsenteeLog,
    AddChild,
    EmployeeDirectory,
    AddEmployee,
    NoticeBoard,
    AddNotice,
    FoodLogFeed,
    MealLogger,
    AttendanceReport,
    CheckIn,
}

impl Screen {
    pub fn allowed_sets(&self) -> &'static [ScreenSet] {
        use ScreenSet::*;
        match self {
            Screen::Entry | Screen::SignIn => &[Entry, Admin, Employee],
            Screen::AdminHome
            | Screen::EmployeeDirectory
            | Screen::AddEmployee
            | Screen::AddNotice
            | Screen::FoodLogFeed
            | Screen::AttendanceReport => &[Admin],
            Screen::EmployeeHome | Screen::AddChild | Screen::MealLogger | Screen::CheckIn => {
                &[Employee]
            }
            Screen::Profile
            | Screen::About
            | Screen::ChildDirectory
            | Screen::AbsenteeLog
            | Screen::NoticeBoard => &[Admin, Employee],
        }
    }

    /// Landing screen for a screen set.
    pub fn home_for(set: ScreenSet) -> Screen {
        match set {
            ScreenSet::Entry => Screen::Entry,
            ScreenSet::Admin => Screen::AdminHome,
            ScreenSet::Employee => Screen::EmployeeHome,
        }
    }
}

/// Outcome of entering a screen directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    Enter(ScreenSet),
    RedirectToEntry,
}

pub fn enter(session: Option<&Session>, screen: Screen) -> Gate {
    let set = authorize(session);
    if screen.allowed_sets().contains(&set) {
        Gate::Enter(set)
    } else {
        Gate::RedirectToEntry
    }
}
