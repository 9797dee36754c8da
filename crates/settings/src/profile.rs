//! Per-profile schema.
//!
//! AI-provider configuration and UI toggles, registered once per profile
//! before any UI or AI-invocation code reads provider configuration.

use browseros_prefs::{PrefError, PrefService};

use crate::catalog::BUILT_IN_PROVIDERS;

/// Structured provider registry document, stored as JSON. Authoritative for
/// every provider it enumerates; empty until the profile moves off the
/// legacy keys.
pub const PROVIDERS_PREF: &str = "browseros.providers";
/// Legacy default-provider id.
pub const DEFAULT_PROVIDER_PREF: &str = "nxtscape.default_provider";
/// Whether toolbar buttons show text labels.
pub const SHOW_TOOLBAR_LABELS_PREF: &str = "browseros.show_toolbar_labels";
/// User-defined providers, stored as a JSON array.
pub const CUSTOM_PROVIDERS_PREF: &str = "browseros.custom_providers";

/// Register the per-profile preferences.
pub fn register_profile_prefs(prefs: &mut PrefService) -> Result<(), PrefError> {
    // The full provider configuration as one JSON document:
    // defaultProviderId plus the providers array.
    prefs.register_string(PROVIDERS_PREF, "")?;

    // Legacy flat keys, kept for profiles that predate the structured
    // document.
    prefs.register_string(DEFAULT_PROVIDER_PREF, "browseros")?;
    for provider in BUILT_IN_PROVIDERS {
        if let Some(key) = provider.api_key_pref {
            prefs.register_string(key, "")?;
        }
        prefs.register_string(provider.model_pref, provider.default_model)?;
        if let Some(key) = provider.base_url_pref {
            prefs.register_string(key, provider.default_base_url)?;
        }
    }

    // Toolbar settings
    prefs.register_boolean(SHOW_TOOLBAR_LABELS_PREF, true)?;

    // Custom providers list
    prefs.register_string(CUSTOM_PROVIDERS_PREF, "[]")?;

    Ok(())
}

pub fn show_toolbar_labels(prefs: &PrefService) -> Result<bool, PrefError> {
    prefs.boolean(SHOW_TOOLBAR_LABELS_PREF)
}

pub fn set_show_toolbar_labels(prefs: &mut PrefService, value: bool) -> Result<(), PrefError> {
    prefs.set_boolean(SHOW_TOOLBAR_LABELS_PREF, value)
}
