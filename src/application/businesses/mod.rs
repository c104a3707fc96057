pub mod get;
pub mod update;
pub mod verification;
pub mod view;
