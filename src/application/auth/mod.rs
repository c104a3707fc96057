pub mod login;
pub mod logout;
pub mod password_reset;
pub mod register;
pub mod send_otp;
pub mod session;
pub mod tokens;
pub mod verify_otp;
