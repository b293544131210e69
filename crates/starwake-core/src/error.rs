//! Configuration errors.
//!
//! The simulation itself never fails; only loading definition data can.

use std::fmt;

/// Why a definitions catalog was rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The JSON document did not parse.
    Parse { message: String },
    /// Two definitions of the same family share an id.
    DuplicateId { family: &'static str, id: String },
    /// A numeric field is out of its valid range.
    InvalidValue {
        id: String,
        field: &'static str,
        value: f64,
    },
    /// A definition references an id that does not exist.
    UnknownReference {
        id: String,
        field: &'static str,
        target: String,
    },
    /// No boss definitions are available for the final phase.
    EmptyBossRoster,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse { message } => write!(f, "catalog parse error: {message}"),
            Self::DuplicateId { family, id } => {
                write!(f, "duplicate {family} definition id: {id}")
            }
            Self::InvalidValue { id, field, value } => {
                write!(f, "invalid value for {id}.{field}: {value}")
            }
            Self::UnknownReference { id, field, target } => {
                write!(f, "{id}.{field} references unknown definition {target}")
            }
            Self::EmptyBossRoster => write!(f, "catalog has no boss definitions"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse {
            message: err.to_string(),
        }
    }
}
