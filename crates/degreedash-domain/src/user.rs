//! User domain types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::UnknownVariant;

/// Whether a user is a current student or a graduate.
///
/// Wire and storage format: `"current"` / `"alumni"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    #[default]
    Current,
    Alumni,
}

impl UserType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Current => "current",
            Self::Alumni => "alumni",
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "current" => Ok(Self::Current),
            "alumni" => Ok(Self::Alumni),
            other => Err(UnknownVariant {
                kind: "user type",
                value: other.to_owned(),
            }),
        }
    }
}
