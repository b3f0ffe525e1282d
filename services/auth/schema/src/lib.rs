//! sea-orm entities owned by the auth service.

pub mod admin_credentials;
pub mod password_reset_otps;
