//! Typed preference registry for BrowserOS configuration.
//!
//! Many independently-developed subsystems share one flat key namespace.
//! Each registers its keys with typed defaults against a scope-specific
//! [`PrefService`], and every registration is checked against a single
//! process-wide [`KeyNamespace`] so a colliding key fails startup instead of
//! silently shadowing another subsystem's setting.
//!
//! Persistence is external: the registry only needs keyed read/write of
//! current values, expressed as the [`PrefStore`] trait.

pub mod error;
pub mod namespace;
pub mod service;
pub mod store;
pub mod value;

pub use {
    error::PrefError,
    namespace::{KeyNamespace, Scope},
    service::PrefService,
    store::{MemoryStore, PrefStore},
    value::{PrefKind, PrefValue},
};
