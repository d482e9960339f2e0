pub mod auth;
pub mod companies;
pub mod dashboard;
pub mod inventory;
pub mod users;
