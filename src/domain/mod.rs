pub mod auth;
pub mod businesses;
pub mod clock;
pub mod mailer;
pub mod otp;
pub mod password;
pub mod principal;
pub mod users;
