pub mod auth;
pub mod businesses;
pub mod credentials;
pub mod otp;
pub mod users;

#[cfg(test)]
pub mod testing;
