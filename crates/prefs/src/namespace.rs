//! Process-wide preference key namespace.
//!
//! Every subsystem registers into one flat namespace. The guard records each
//! claim so a repeated registration with an identical default stays an
//! idempotent no-op, while a conflicting one fails startup loudly.

use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, Mutex, MutexGuard},
};

use tracing::debug;

use crate::{error::PrefError, value::PrefValue};

/// Configuration scope a key belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// One live instance per running browser process.
    LocalState,
    /// One live instance per user profile; a process may host several.
    Profile,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LocalState => write!(f, "local-state"),
            Self::Profile => write!(f, "profile"),
        }
    }
}

#[derive(Debug, Clone)]
struct ClaimedKey {
    scope: Scope,
    default: PrefValue,
}

/// Process-wide registry of claimed preference keys.
///
/// Cloning shares the underlying claim table: every [`PrefService`] in the
/// process holds a clone of one namespace, which is what lets profile
/// registries re-register the shared profile keys idempotently while any
/// cross-subsystem collision is rejected.
///
/// [`PrefService`]: crate::service::PrefService
#[derive(Debug, Clone, Default)]
pub struct KeyNamespace {
    inner: Arc<Mutex<HashMap<String, ClaimedKey>>>,
}

impl KeyNamespace {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, ClaimedKey>> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Claim `key` for `scope` with `default`.
    ///
    /// Keys are matched by exact, case-sensitive comparison. Returns
    /// `Ok(true)` for a fresh claim, `Ok(false)` for an idempotent re-claim
    /// (identical scope and default), and an error when the key is already
    /// held with a different default or by the other scope.
    pub fn claim(&self, key: &str, scope: Scope, default: &PrefValue) -> Result<bool, PrefError> {
        let mut claims = self.lock();
        if let Some(existing) = claims.get(key) {
            if existing.scope != scope {
                return Err(PrefError::ScopeMismatch {
                    key: key.to_string(),
                    existing: existing.scope,
                });
            }
            if existing.default != *default {
                return Err(PrefError::DefaultMismatch {
                    key: key.to_string(),
                    existing: existing.default.clone(),
                    requested: default.clone(),
                });
            }
            return Ok(false);
        }

        debug!(key, scope = %scope, "claimed pref key");
        claims.insert(key.to_string(), ClaimedKey {
            scope,
            default: default.clone(),
        });
        Ok(true)
    }

    /// Number of distinct keys claimed so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
