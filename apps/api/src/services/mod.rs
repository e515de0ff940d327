//! Service layer for Inkpress

pub mod password;

pub use password::PasswordService;
