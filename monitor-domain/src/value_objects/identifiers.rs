// Identifier value objects

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable server-side identity of an alliance. Zero is the unset sentinel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AllianceId(pub i64);

impl AllianceId {
    pub fn is_unset(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for AllianceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Server-side identity of a player. Zero is the unset sentinel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub i64);

impl PlayerId {
    pub fn is_unset(&self) -> bool {
        self.0 == 0
    }
}
