//! Fixed table of CareNest REST endpoints.

use reqwest::Method;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    SignIn,
    AdminChildren,
    AddChild,
    ChildLog,
    Employees,
    AddEmployee,
    GetFile,
    AddNotice,
    Notices,
    LatestNotice,
    AddFoodLog,
    FoodLogs,
    EmployeeAttendance,
    CheckIn,
    CheckOut,
}

impl Endpoint {
    pub const ALL: [Endpoint; 15] = [
        Endpoint::SignIn,
        Endpoint::AdminChildren,
        Endpoint::AddChild,
        Endpoint::ChildLog,
        Endpoint::Employees,
        Endpoint::AddEmployee,
        Endpoint::GetFile,
        Endpoint::AddNotice,
        Endpoint::Notices,
        Endpoint::LatestNotice,
        Endpoint::AddFoodLog,
        Endpoint::FoodLogs,
        Endpoint::EmployeeAttendance,
        Endpoint::CheckIn,
        Endpoint::CheckOut,
    ];

    /// Path relative to the API base URL (no leading slash).
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::SignIn => "users/login",
            Endpoint::AdminChildren => "admin/getChildren",
            Endpoint::AddChild => "users/add-child",
            Endpoint::ChildLog => "users/child-log",
            Endpoint::Employees => "admin/getEmployees",
            Endpoint::AddEmployee => "admin/add-employee",
            Endpoint::GetFile => "users/getFile",
            Endpoint::AddNotice => "admin/addNotice",
            Endpoint::Notices => "users/notices",
            Endpoint::LatestNotice => "users/latest-notice",
            Endpoint::AddFoodLog => "users/food-log",
            Endpoint::FoodLogs => "admin/foodLogs",
            Endpoint::EmployeeAttendance => "admin/empAttendance",
            Endpoint::CheckIn => "users/checkin",
            Endpoint::CheckOut => "users/checkout",
        }
    }

    pub fn method(&self) -> Method {
        match self {
            Endpoint::AdminChildren
            | Endpoint::Employees
            | Endpoint::Notices
            | Endpoint::LatestNotice
            | Endpoint::FoodLogs
            | Endpoint::EmployeeAttendance => Method::GET,
            _ => Method::POST,
        }
    }

    /// Everything except sign-in carries a bearer token.
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Endpoint::SignIn)
    }
}
