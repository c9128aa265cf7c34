//! Identity data models.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User ID type
pub type UserId = Uuid;

/// Platform role attached to an authenticated user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Festival staff with administrative rights
    Admin,
    /// Captain of one or more registered teams
    Captain,
    /// Individual competitor
    Player,
}

impl Role {
    /// Parse a role from its lowercase wire name
    pub fn parse(value: &str) -> Option<Role> {
        match value {
            "admin" => Some(Role::Admin),
            "captain" => Some(Role::Captain),
            "player" => Some(Role::Player),
            _ => None,
        }
    }

    /// Lowercase wire name of the role
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Captain => "captain",
            Role::Player => "player",
        }
    }
}

/// Caller identity, established by the platform's authentication layer
/// upstream of this engine. The engine only ever authorizes; it never
/// authenticates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// User ID of the caller
    pub user_id: UserId,
    /// Platform role of the caller
    pub role: Role,
}

impl Identity {
    /// Create an identity
    pub fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }

    /// Whether the caller holds administrative rights
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
