pub mod businesses;
pub mod otps;
pub mod users;
