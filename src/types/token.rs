//! Token classes and reserved vocabulary entries

use serde::{Deserialize, Serialize};

/// Out-of-vocabulary sentinel token
pub const OOV_TOKEN: &str = "OOV";
/// Index of the out-of-vocabulary sentinel
pub const OOV_INDEX: usize = 0;
/// Empty (padding) token
pub const PAD_TOKEN: &str = "";
/// Index of the empty token
pub const PAD_INDEX: usize = 1;
/// Number of reserved indices at the start of every vocabulary
pub const RESERVED_COUNT: usize = 2;

/// Which vocabulary a token belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Entity,
    Relation,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Entity => write!(f, "entity"),
            TokenKind::Relation => write!(f, "relation"),
        }
    }
}

impl std::str::FromStr for TokenKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "entity" => Ok(TokenKind::Entity),
            "relation" => Ok(TokenKind::Relation),
            other => Err(format!(
                "unknown token kind '{}', expected entity or relation",
                other
            )),
        }
    }
}
