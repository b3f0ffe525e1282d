pub mod password;
pub mod reset;
pub mod session;
pub mod sweep;
