//! BrowserOS durable configuration schema.
//!
//! Two registrars populate the typed preference registry at startup:
//! [`server::register_local_state_prefs`] once per process (embedded server
//! ports), and [`profile::register_profile_prefs`] once per profile
//! (AI-provider configuration and UI toggles).
//!
//! Provider configuration exists in two representations: the legacy flat
//! `nxtscape.*` keys and the newer structured JSON document under
//! [`profile::PROVIDERS_PREF`]. The [`resolve`] module reconciles them — the
//! structured document is authoritative for every provider it enumerates,
//! and the flat keys back-fill the rest.

pub mod catalog;
pub mod error;
pub mod profile;
pub mod providers;
pub mod resolve;
pub mod server;

pub use {
    catalog::{BUILT_IN_PROVIDERS, BuiltInProvider},
    error::SettingsError,
    providers::{ProviderSettings, ProvidersDoc},
    resolve::{ProviderSource, ResolvedProvider},
    server::ServerSettings,
};
