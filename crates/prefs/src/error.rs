//! Preference registry error types.

use crate::{
    namespace::Scope,
    value::{PrefKind, PrefValue},
};

/// Errors produced by preference registration and access.
///
/// Every variant is a programmer error: a misconfigured registration or an
/// access that contradicts it. The embedder treats these as fatal during
/// startup rather than recovering at runtime.
#[derive(Debug, thiserror::Error)]
pub enum PrefError {
    /// A key was re-registered with a default differing from the first
    /// registration.
    #[error("pref {key:?} already registered with default {existing}, refusing {requested}")]
    DefaultMismatch {
        key: String,
        existing: PrefValue,
        requested: PrefValue,
    },

    /// A key claimed by one scope was re-registered under the other.
    #[error("pref {key:?} already registered under the {existing} scope")]
    ScopeMismatch { key: String, existing: Scope },

    /// A key was read or written without being registered first.
    #[error("pref {key:?} was never registered")]
    Unregistered { key: String },

    /// A key was accessed with a type other than the one it was registered
    /// with.
    #[error("pref {key:?} is a {registered} pref, accessed as {requested}")]
    TypeMismatch {
        key: String,
        registered: PrefKind,
        requested: PrefKind,
    },
}
