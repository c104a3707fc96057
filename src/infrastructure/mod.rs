pub mod auth;
pub mod clock;
pub mod config;
pub mod db;
pub mod mailer;
pub mod password;
pub mod repositories;
pub mod state;
