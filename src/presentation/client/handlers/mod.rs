pub mod auth;
pub mod business_auth;
pub mod businesses;
pub mod session;
pub mod user_auth;
pub mod users;
