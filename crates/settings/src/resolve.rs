//! Effective provider configuration.
//!
//! Provider settings live in two tiers: the structured registry document and
//! the legacy flat keys. Resolution is a structured overlay over the legacy
//! base — the document wins for every provider it enumerates, the flat keys
//! back-fill the rest, and user-defined custom providers form a third tier
//! behind both. The precedence rules alone make an unmigrated or
//! partially-migrated profile deterministic; no two keys ever need to be
//! read atomically.

use secrecy::Secret;

use browseros_prefs::PrefService;

use crate::{
    catalog::{self, BUILT_IN_PROVIDERS, BuiltInProvider},
    error::SettingsError,
    profile::{CUSTOM_PROVIDERS_PREF, DEFAULT_PROVIDER_PREF, PROVIDERS_PREF},
    providers::{ProviderSettings, ProvidersDoc, parse_custom_providers, parse_providers_doc},
};

/// Which tier supplied a resolved provider's settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderSource {
    /// Entry in the structured registry document.
    Structured,
    /// Synthesized from the provider's legacy flat keys.
    Legacy,
    /// Entry in the user-defined custom-providers list.
    Custom,
}

/// A provider's effective settings plus the tier that supplied them.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedProvider {
    pub settings: ProviderSettings,
    pub source: ProviderSource,
}

/// The parsed structured registry, or `None` while this profile still runs
/// on legacy keys. Empty and malformed documents behave identically.
pub fn providers_doc(prefs: &PrefService) -> Result<Option<ProvidersDoc>, SettingsError> {
    let raw = prefs.string(PROVIDERS_PREF)?;
    Ok(parse_providers_doc(&raw))
}

/// Resolve the effective configuration for `provider_id`.
///
/// Lookup order: structured document, then the legacy flat keys for
/// built-ins, then the custom-providers list.
/// [`SettingsError::NotConfigured`] means no tier knows the provider — "no
/// credentials available", not a failure.
pub fn resolve_provider(
    prefs: &PrefService,
    provider_id: &str,
) -> Result<ResolvedProvider, SettingsError> {
    if let Some(doc) = providers_doc(prefs)?
        && let Some(entry) = doc.get(provider_id)
    {
        return Ok(ResolvedProvider {
            settings: entry.clone(),
            source: ProviderSource::Structured,
        });
    }

    if let Some(built_in) = catalog::built_in(provider_id) {
        return Ok(ResolvedProvider {
            settings: legacy_settings(prefs, built_in)?,
            source: ProviderSource::Legacy,
        });
    }

    if let Some(custom) = custom_providers(prefs)?
        .into_iter()
        .find(|p| p.provider_id == provider_id)
    {
        return Ok(ResolvedProvider {
            settings: custom,
            source: ProviderSource::Custom,
        });
    }

    Err(SettingsError::NotConfigured(provider_id.to_string()))
}

fn legacy_settings(
    prefs: &PrefService,
    built_in: &BuiltInProvider,
) -> Result<ProviderSettings, SettingsError> {
    let api_key = match built_in.api_key_pref {
        Some(key) => prefs.string(key)?,
        None => String::new(),
    };
    let base_url = match built_in.base_url_pref {
        Some(key) => prefs.string(key)?,
        None => String::new(),
    };
    Ok(ProviderSettings {
        provider_id: built_in.id.to_string(),
        api_key: Secret::new(api_key),
        model: prefs.string(built_in.model_pref)?,
        base_url,
    })
}

/// The effective default provider id: the structured document's, unless it
/// is unset there, in which case the legacy key answers.
pub fn default_provider_id(prefs: &PrefService) -> Result<String, SettingsError> {
    if let Some(doc) = providers_doc(prefs)?
        && !doc.default_provider_id.is_empty()
    {
        return Ok(doc.default_provider_id);
    }
    Ok(prefs.string(DEFAULT_PROVIDER_PREF)?)
}

/// The user-defined custom providers. Malformed JSON reads as empty.
pub fn custom_providers(prefs: &PrefService) -> Result<Vec<ProviderSettings>, SettingsError> {
    let raw = prefs.string(CUSTOM_PROVIDERS_PREF)?;
    Ok(parse_custom_providers(&raw))
}

/// Every provider id addressable in this profile: structured entries in
/// document order, then built-ins the document doesn't cover, then custom
/// providers.
pub fn configured_provider_ids(prefs: &PrefService) -> Result<Vec<String>, SettingsError> {
    let mut ids: Vec<String> = Vec::new();
    if let Some(doc) = providers_doc(prefs)? {
        for entry in &doc.providers {
            push_unique(&mut ids, &entry.provider_id);
        }
    }
    for built_in in BUILT_IN_PROVIDERS {
        push_unique(&mut ids, built_in.id);
    }
    for custom in custom_providers(prefs)? {
        push_unique(&mut ids, &custom.provider_id);
    }
    Ok(ids)
}

fn push_unique(ids: &mut Vec<String>, id: &str) {
    if !ids.iter().any(|existing| existing == id) {
        ids.push(id.to_string());
    }
}

/// Serialize `doc` and persist it as the structured registry.
pub fn set_providers_doc(prefs: &mut PrefService, doc: &ProvidersDoc) -> Result<(), SettingsError> {
    let raw = serde_json::to_string(doc)?;
    prefs.set_string(PROVIDERS_PREF, raw)?;
    Ok(())
}

/// Serialize `providers` and persist it as the custom-providers list.
pub fn set_custom_providers(
    prefs: &mut PrefService,
    providers: &[ProviderSettings],
) -> Result<(), SettingsError> {
    let raw = serde_json::to_string(providers)?;
    prefs.set_string(CUSTOM_PROVIDERS_PREF, raw)?;
    Ok(())
}

/// Explicit one-time migration: write a structured document capturing the
/// current effective view.
///
/// Resolution never requires this — the overlay rules keep unmigrated
/// profiles deterministic — but after a snapshot the document covers every
/// built-in, so the legacy keys stop influencing reads. Existing structured
/// entries are preserved as-is; only providers absent from the document are
/// filled in from their legacy keys.
pub fn snapshot_to_structured(prefs: &mut PrefService) -> Result<ProvidersDoc, SettingsError> {
    let mut providers = providers_doc(prefs)?
        .map(|doc| doc.providers)
        .unwrap_or_default();
    for built_in in BUILT_IN_PROVIDERS {
        if providers.iter().any(|p| p.provider_id == built_in.id) {
            continue;
        }
        providers.push(legacy_settings(prefs, built_in)?);
    }

    let doc = ProvidersDoc {
        default_provider_id: default_provider_id(prefs)?,
        providers,
    };
    set_providers_doc(prefs, &doc)?;
    Ok(doc)
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::profile::register_profile_prefs,
        browseros_prefs::{KeyNamespace, MemoryStore, PrefValue, Scope},
        secrecy::ExposeSecret,
    };

    fn fresh_profile() -> PrefService {
        let mut prefs = PrefService::new(
            Scope::Profile,
            KeyNamespace::new(),
            Box::new(MemoryStore::new()),
        );
        register_profile_prefs(&mut prefs).unwrap();
        prefs
    }

    fn profile_with_persisted(values: Vec<(&str, PrefValue)>) -> PrefService {
        let mut prefs = PrefService::new(
            Scope::Profile,
            KeyNamespace::new(),
            Box::new(MemoryStore::with_persisted(values)),
        );
        register_profile_prefs(&mut prefs).unwrap();
        prefs
    }

    fn settings(id: &str, key: &str, model: &str, base_url: &str) -> ProviderSettings {
        ProviderSettings {
            provider_id: id.to_string(),
            api_key: Secret::new(key.to_string()),
            model: model.to_string(),
            base_url: base_url.to_string(),
        }
    }

    #[test]
    fn fresh_profile_resolves_openai_from_legacy_defaults() {
        let prefs = fresh_profile();
        let resolved = resolve_provider(&prefs, "openai").unwrap();
        assert_eq!(resolved.source, ProviderSource::Legacy);
        assert_eq!(resolved.settings, settings("openai", "", "gpt-4o", ""));
    }

    #[test]
    fn fresh_profile_resolves_ollama_with_local_endpoint() {
        let prefs = fresh_profile();
        let resolved = resolve_provider(&prefs, "ollama").unwrap();
        assert_eq!(
            resolved.settings,
            settings("ollama", "", "", "http://localhost:11434")
        );
    }

    #[test]
    fn structured_entry_wins_over_conflicting_legacy_fields() {
        let mut prefs = profile_with_persisted(vec![(
            "nxtscape.anthropic_api_key",
            PrefValue::String("sk-legacy".into()),
        )]);
        set_providers_doc(&mut prefs, &ProvidersDoc {
            default_provider_id: "anthropic".into(),
            providers: vec![settings("anthropic", "sk-structured", "claude-3-7", "")],
        })
        .unwrap();

        let resolved = resolve_provider(&prefs, "anthropic").unwrap();
        assert_eq!(resolved.source, ProviderSource::Structured);
        assert_eq!(resolved.settings.api_key.expose_secret(), "sk-structured");
        assert_eq!(resolved.settings.model, "claude-3-7");
    }

    #[test]
    fn built_ins_absent_from_the_document_still_fall_back_to_legacy() {
        let mut prefs = fresh_profile();
        set_providers_doc(&mut prefs, &ProvidersDoc {
            default_provider_id: "anthropic".into(),
            providers: vec![settings("anthropic", "sk-1", "claude-3-7", "")],
        })
        .unwrap();

        let resolved = resolve_provider(&prefs, "openai").unwrap();
        assert_eq!(resolved.source, ProviderSource::Legacy);
        assert_eq!(resolved.settings.model, "gpt-4o");
    }

    #[test]
    fn custom_provider_resolves_by_id() {
        let mut prefs = fresh_profile();
        set_custom_providers(&mut prefs, &[settings(
            "together",
            "tk-1",
            "llama-3.3-70b",
            "https://api.together.xyz/v1",
        )])
        .unwrap();

        let resolved = resolve_provider(&prefs, "together").unwrap();
        assert_eq!(resolved.source, ProviderSource::Custom);
        assert_eq!(resolved.settings.base_url, "https://api.together.xyz/v1");
    }

    #[test]
    fn structured_entry_shadows_a_custom_provider_with_the_same_id() {
        let mut prefs = fresh_profile();
        set_custom_providers(&mut prefs, &[settings("together", "tk-old", "m", "u")]).unwrap();
        set_providers_doc(&mut prefs, &ProvidersDoc {
            default_provider_id: String::new(),
            providers: vec![settings("together", "tk-new", "m", "u")],
        })
        .unwrap();

        let resolved = resolve_provider(&prefs, "together").unwrap();
        assert_eq!(resolved.source, ProviderSource::Structured);
        assert_eq!(resolved.settings.api_key.expose_secret(), "tk-new");
    }

    #[test]
    fn unknown_provider_is_not_configured() {
        let prefs = fresh_profile();
        let err = resolve_provider(&prefs, "groq").unwrap_err();
        assert!(matches!(err, SettingsError::NotConfigured(id) if id == "groq"));
    }

    #[test]
    fn malformed_document_behaves_like_an_empty_one() {
        let intact = fresh_profile();
        let truncated = profile_with_persisted(vec![(
            PROVIDERS_PREF,
            PrefValue::String(r#"{"defaultProviderId": "anthropic", "prov"#.into()),
        )]);

        let a = resolve_provider(&intact, "anthropic").unwrap();
        let b = resolve_provider(&truncated, "anthropic").unwrap();
        assert_eq!(a, b);
        assert_eq!(b.source, ProviderSource::Legacy);
    }

    #[test]
    fn default_provider_prefers_the_structured_document() {
        let mut prefs = fresh_profile();
        assert_eq!(default_provider_id(&prefs).unwrap(), "browseros");

        set_providers_doc(&mut prefs, &ProvidersDoc {
            default_provider_id: "anthropic".into(),
            providers: Vec::new(),
        })
        .unwrap();
        assert_eq!(default_provider_id(&prefs).unwrap(), "anthropic");
    }

    #[test]
    fn unset_structured_default_falls_back_to_the_legacy_key() {
        let mut prefs = profile_with_persisted(vec![(
            DEFAULT_PROVIDER_PREF,
            PrefValue::String("ollama".into()),
        )]);
        set_providers_doc(&mut prefs, &ProvidersDoc {
            default_provider_id: String::new(),
            providers: vec![settings("openai", "sk", "gpt-4o", "")],
        })
        .unwrap();
        assert_eq!(default_provider_id(&prefs).unwrap(), "ollama");
    }

    #[test]
    fn configured_ids_list_structured_first_then_built_ins_then_custom() {
        let mut prefs = fresh_profile();
        set_providers_doc(&mut prefs, &ProvidersDoc {
            default_provider_id: "anthropic".into(),
            providers: vec![
                settings("anthropic", "sk", "claude-3-7", ""),
                settings("openai", "sk", "gpt-4o", ""),
            ],
        })
        .unwrap();
        set_custom_providers(&mut prefs, &[settings("together", "tk", "m", "u")]).unwrap();

        assert_eq!(configured_provider_ids(&prefs).unwrap(), vec![
            "anthropic",
            "openai",
            "browseros",
            "gemini",
            "ollama",
            "together",
        ]);
    }

    #[test]
    fn snapshot_covers_every_built_in_and_freezes_the_effective_view() {
        let mut prefs = profile_with_persisted(vec![(
            "nxtscape.openai_api_key",
            PrefValue::String("sk-user".into()),
        )]);

        let doc = snapshot_to_structured(&mut prefs).unwrap();
        assert_eq!(doc.default_provider_id, "browseros");
        for built_in in BUILT_IN_PROVIDERS {
            assert!(doc.get(built_in.id).is_some());
        }
        assert_eq!(doc.get("openai").unwrap().api_key.expose_secret(), "sk-user");

        // Legacy writes after the snapshot no longer influence resolution.
        prefs
            .set_string("nxtscape.openai_api_key", "sk-later")
            .unwrap();
        let resolved = resolve_provider(&prefs, "openai").unwrap();
        assert_eq!(resolved.source, ProviderSource::Structured);
        assert_eq!(resolved.settings.api_key.expose_secret(), "sk-user");
    }

    #[test]
    fn snapshot_preserves_existing_structured_entries() {
        let mut prefs = fresh_profile();
        set_providers_doc(&mut prefs, &ProvidersDoc {
            default_provider_id: "anthropic".into(),
            providers: vec![settings("anthropic", "sk-structured", "claude-3-7", "")],
        })
        .unwrap();

        let doc = snapshot_to_structured(&mut prefs).unwrap();
        assert_eq!(doc.default_provider_id, "anthropic");
        assert_eq!(
            doc.get("anthropic").unwrap().api_key.expose_secret(),
            "sk-structured"
        );
        // The snapshot round-trips through the store.
        assert_eq!(providers_doc(&prefs).unwrap().unwrap(), doc);
    }

    #[test]
    fn structured_document_survives_persistence_verbatim() {
        let mut prefs = fresh_profile();
        let doc = ProvidersDoc {
            default_provider_id: "ollama".into(),
            providers: vec![
                settings("ollama", "", "llama3:70b", "http://localhost:11434"),
                settings("openai", "sk-∆", "gpt-4o", ""),
            ],
        };
        set_providers_doc(&mut prefs, &doc).unwrap();
        assert_eq!(providers_doc(&prefs).unwrap().unwrap(), doc);
    }
}
