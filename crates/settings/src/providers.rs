//! Typed forms of the string-serialized provider documents.
//!
//! The structured registry and the custom-providers list are persisted as
//! opaque JSON strings. Parsing and serializing happen here, at the storage
//! boundary; the rest of the crate only ever sees these typed values.

use {
    secrecy::{ExposeSecret, Secret},
    serde::{Deserialize, Serialize},
    tracing::warn,
};

/// Configuration for a single AI provider, as it appears in both the
/// structured registry document and the custom-providers list.
///
/// Unknown JSON fields are tolerated on the way in so newer builds can add
/// fields without breaking older readers.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProviderSettings {
    pub provider_id: String,
    /// Opaque secret; empty for providers that need no key.
    #[serde(serialize_with = "serialize_secret")]
    pub api_key: Secret<String>,
    pub model: String,
    /// Empty means "use the provider's hard-coded default endpoint".
    pub base_url: String,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            provider_id: String::new(),
            api_key: Secret::new(String::new()),
            model: String::new(),
            base_url: String::new(),
        }
    }
}

impl std::fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("provider_id", &self.provider_id)
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl PartialEq for ProviderSettings {
    fn eq(&self, other: &Self) -> bool {
        self.provider_id == other.provider_id
            && self.api_key.expose_secret() == other.api_key.expose_secret()
            && self.model == other.model
            && self.base_url == other.base_url
    }
}

/// The structured provider registry document: the authoritative
/// configuration for every provider it enumerates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProvidersDoc {
    pub default_provider_id: String,
    /// Ordered; the order is preserved through serialization and is the
    /// order providers are listed to the user.
    pub providers: Vec<ProviderSettings>,
}

impl ProvidersDoc {
    #[must_use]
    pub fn get(&self, provider_id: &str) -> Option<&ProviderSettings> {
        self.providers.iter().find(|p| p.provider_id == provider_id)
    }
}

fn serialize_secret<S: serde::Serializer>(
    secret: &Secret<String>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}

/// Parse the serialized structured registry.
///
/// An empty string is the expected first-run state; malformed JSON is a data
/// error recovered by treating the structured view as absent. Neither is
/// surfaced to the caller.
pub fn parse_providers_doc(raw: &str) -> Option<ProvidersDoc> {
    if raw.trim().is_empty() {
        return None;
    }
    match serde_json::from_str(raw) {
        Ok(doc) => Some(doc),
        Err(error) => {
            warn!(error = %error, "structured provider registry is invalid JSON and will be ignored");
            None
        },
    }
}

/// Parse the serialized custom-providers list, falling back to empty on
/// malformed JSON.
pub fn parse_custom_providers(raw: &str) -> Vec<ProviderSettings> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    match serde_json::from_str(raw) {
        Ok(list) => list,
        Err(error) => {
            warn!(error = %error, "custom providers list is invalid JSON and will be ignored");
            Vec::new()
        },
    }
}
