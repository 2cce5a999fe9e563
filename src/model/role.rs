use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Staff role carried in the session context. Nothing is gated on it.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin = 1,
    Teacher = 2,
    Staff = 3,
}

impl Role {
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Role::Admin),
            2 => Some(Role::Teacher),
            3 => Some(Role::Staff),
            _ => None,
        }
    }
}
