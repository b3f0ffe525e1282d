//! Admin role tag.

use serde::{Deserialize, Serialize};

/// Role tag stored on every credential record and embedded in session tokens.
///
/// Wire format: plain string. Only `"admin"` passes the session gate; any other
/// tag is kept verbatim so it round-trips through the store unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Admin,
    Other(String),
}

impl Role {
    pub const ADMIN: &'static str = "admin";

    pub fn parse(tag: &str) -> Self {
        if tag == Self::ADMIN {
            Self::Admin
        } else {
            Self::Other(tag.to_owned())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Admin => Self::ADMIN,
            Self::Other(tag) => tag,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl From<String> for Role {
    fn from(tag: String) -> Self {
        Self::parse(&tag)
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_owned()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
