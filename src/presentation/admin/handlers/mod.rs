pub mod businesses;
pub mod users;
