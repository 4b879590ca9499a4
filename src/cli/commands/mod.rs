pub mod about;
pub mod attendance;
pub mod auth;
pub mod children;
pub mod employees;
pub mod food;
pub mod home;
pub mod notices;
pub mod profile;
