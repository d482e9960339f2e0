pub mod auth;
pub mod companies;
pub mod dashboard;
pub mod inventory;
pub mod movements;
pub mod suppliers;
pub mod uploads;
pub mod users;
