pub mod auth;
pub mod cors;
pub mod error_detail;
pub mod rate_limit;
