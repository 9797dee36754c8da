//! Per-scope preference registry.

use std::collections::HashMap;

use tracing::warn;

use crate::{
    error::PrefError,
    namespace::{KeyNamespace, Scope},
    store::PrefStore,
    value::{PrefKind, PrefValue},
};

/// Typed preference registry for one scope instance: the process-wide local
/// state, or a single profile.
///
/// Registration establishes a key's type and default. Defaults never reach
/// the store, so a value persisted by an earlier run is never overwritten by
/// re-registering (first-write-wins). Reads return the persisted value when
/// one exists and the registered default otherwise.
///
/// Registration and writes are a synchronous single-threaded sequence; the
/// caller serializes them per scope instance. Only the shared
/// [`KeyNamespace`] is safe to touch from concurrently-loading profiles.
pub struct PrefService {
    scope: Scope,
    namespace: KeyNamespace,
    defaults: HashMap<String, PrefValue>,
    store: Box<dyn PrefStore>,
}

impl PrefService {
    pub fn new(scope: Scope, namespace: KeyNamespace, store: Box<dyn PrefStore>) -> Self {
        Self {
            scope,
            namespace,
            defaults: HashMap::new(),
            store,
        }
    }

    #[must_use]
    pub fn scope(&self) -> Scope {
        self.scope
    }

    // ── Registration ────────────────────────────────────────────────────────

    pub fn register_integer(&mut self, key: &str, default: i64) -> Result<(), PrefError> {
        self.register(key, PrefValue::Integer(default))
    }

    pub fn register_boolean(&mut self, key: &str, default: bool) -> Result<(), PrefError> {
        self.register(key, PrefValue::Boolean(default))
    }

    pub fn register_string(
        &mut self,
        key: &str,
        default: impl Into<String>,
    ) -> Result<(), PrefError> {
        self.register(key, PrefValue::String(default.into()))
    }

    fn register(&mut self, key: &str, default: PrefValue) -> Result<(), PrefError> {
        self.namespace.claim(key, self.scope, &default)?;
        self.defaults.insert(key.to_string(), default);
        Ok(())
    }

    // ── Reads ───────────────────────────────────────────────────────────────

    pub fn integer(&self, key: &str) -> Result<i64, PrefError> {
        match self.value(key, PrefKind::Integer)? {
            PrefValue::Integer(v) => Ok(v),
            _ => unreachable!("value() checked the kind"),
        }
    }

    pub fn boolean(&self, key: &str) -> Result<bool, PrefError> {
        match self.value(key, PrefKind::Boolean)? {
            PrefValue::Boolean(v) => Ok(v),
            _ => unreachable!("value() checked the kind"),
        }
    }

    pub fn string(&self, key: &str) -> Result<String, PrefError> {
        match self.value(key, PrefKind::String)? {
            PrefValue::String(v) => Ok(v),
            _ => unreachable!("value() checked the kind"),
        }
    }

    fn value(&self, key: &str, requested: PrefKind) -> Result<PrefValue, PrefError> {
        let default = self
            .defaults
            .get(key)
            .ok_or_else(|| PrefError::Unregistered {
                key: key.to_string(),
            })?;
        if default.kind() != requested {
            return Err(PrefError::TypeMismatch {
                key: key.to_string(),
                registered: default.kind(),
                requested,
            });
        }

        if let Some(persisted) = self.store.get(key) {
            if persisted.kind() == requested {
                return Ok(persisted);
            }
            // A persisted value whose type drifted from the registered one is
            // a data error, recovered by falling back to the default.
            warn!(
                key,
                registered = %default.kind(),
                persisted = %persisted.kind(),
                "ignoring persisted pref with drifted type"
            );
        }
        Ok(default.clone())
    }

    // ── Writes ──────────────────────────────────────────────────────────────

    pub fn set_integer(&mut self, key: &str, value: i64) -> Result<(), PrefError> {
        self.set(key, PrefValue::Integer(value))
    }

    pub fn set_boolean(&mut self, key: &str, value: bool) -> Result<(), PrefError> {
        self.set(key, PrefValue::Boolean(value))
    }

    pub fn set_string(&mut self, key: &str, value: impl Into<String>) -> Result<(), PrefError> {
        self.set(key, PrefValue::String(value.into()))
    }

    fn set(&mut self, key: &str, value: PrefValue) -> Result<(), PrefError> {
        let default = self
            .defaults
            .get(key)
            .ok_or_else(|| PrefError::Unregistered {
                key: key.to_string(),
            })?;
        if default.kind() != value.kind() {
            return Err(PrefError::TypeMismatch {
                key: key.to_string(),
                registered: default.kind(),
                requested: value.kind(),
            });
        }
        self.store.set(key, value);
        Ok(())
    }
}
