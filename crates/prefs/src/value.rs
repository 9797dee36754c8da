//! Typed preference values.

use std::fmt;

/// The type a preference key was registered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefKind {
    Integer,
    Boolean,
    String,
}

impl fmt::Display for PrefKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer => write!(f, "integer"),
            Self::Boolean => write!(f, "boolean"),
            Self::String => write!(f, "string"),
        }
    }
}

/// A single preference value.
#[derive(Debug, Clone, PartialEq)]
pub enum PrefValue {
    Integer(i64),
    Boolean(bool),
    String(String),
}

impl PrefValue {
    #[must_use]
    pub fn kind(&self) -> PrefKind {
        match self {
            Self::Integer(_) => PrefKind::Integer,
            Self::Boolean(_) => PrefKind::Boolean,
            Self::String(_) => PrefKind::String,
        }
    }
}

impl fmt::Display for PrefValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{v}"),
            Self::Boolean(v) => write!(f, "{v}"),
            Self::String(v) => write!(f, "{v:?}"),
        }
    }
}
