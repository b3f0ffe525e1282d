pub mod health;
pub mod json;
pub mod pages;
pub mod password;
pub mod reset;
pub mod session;

use serde::Serialize;

/// `{"message": ...}` success body the admin UI displays.
#[derive(Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
