use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Student gender as encoded on the identity token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Putra,
    Putri,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Putra => "Putra",
            Gender::Putri => "Putri",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Gender {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "putra" => Ok(Gender::Putra),
            "putri" => Ok(Gender::Putri),
            other => Err(CoreError::Parse(format!("unknown gender: {other}"))),
        }
    }
}

/// A parsed identity: the name/class/gender triple decoded from a scanned
/// token. All three fields are mandatory; only the identity parser produces
/// one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
    pub class: String,
    pub gender: Gender,
}
