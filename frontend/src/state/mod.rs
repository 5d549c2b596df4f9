pub mod auth;
pub mod list;
pub mod notify;
pub mod session;
