//! Built-in provider catalog.
//!
//! One entry per provider kind that ships with the browser. The catalog
//! drives both profile registration (which flat keys exist, with which
//! defaults) and the legacy tier of provider resolution, so the two can
//! never drift apart.

/// Static description of one built-in AI provider.
pub struct BuiltInProvider {
    /// Stable provider id, e.g. `"openai"`.
    pub id: &'static str,
    pub display_name: &'static str,
    /// Legacy pref holding the API key; `None` when the provider has none.
    pub api_key_pref: Option<&'static str>,
    /// Legacy pref holding the model id.
    pub model_pref: &'static str,
    /// Legacy pref holding the base URL; `None` when not overridable.
    pub base_url_pref: Option<&'static str>,
    /// Default registered for `model_pref`.
    pub default_model: &'static str,
    /// Default registered for `base_url_pref`. Empty means "use the
    /// provider's hard-coded endpoint".
    pub default_base_url: &'static str,
}

/// Every provider kind that ships with the browser, in registration order.
pub const BUILT_IN_PROVIDERS: &[BuiltInProvider] = &[
    BuiltInProvider {
        id: "browseros",
        display_name: "BrowserOS",
        api_key_pref: None,
        model_pref: "nxtscape.nxtscape_model",
        base_url_pref: None,
        default_model: "",
        default_base_url: "",
    },
    BuiltInProvider {
        id: "openai",
        display_name: "OpenAI",
        api_key_pref: Some("nxtscape.openai_api_key"),
        model_pref: "nxtscape.openai_model",
        base_url_pref: Some("nxtscape.openai_base_url"),
        default_model: "gpt-4o",
        default_base_url: "",
    },
    BuiltInProvider {
        id: "anthropic",
        display_name: "Anthropic",
        api_key_pref: Some("nxtscape.anthropic_api_key"),
        model_pref: "nxtscape.anthropic_model",
        base_url_pref: Some("nxtscape.anthropic_base_url"),
        default_model: "claude-3-5-sonnet-latest",
        default_base_url: "",
    },
    BuiltInProvider {
        id: "gemini",
        display_name: "Google Gemini",
        api_key_pref: Some("nxtscape.gemini_api_key"),
        model_pref: "nxtscape.gemini_model",
        base_url_pref: Some("nxtscape.gemini_base_url"),
        default_model: "gemini-1.5-pro",
        default_base_url: "",
    },
    BuiltInProvider {
        id: "ollama",
        display_name: "Ollama",
        api_key_pref: Some("nxtscape.ollama_api_key"),
        model_pref: "nxtscape.ollama_model",
        base_url_pref: Some("nxtscape.ollama_base_url"),
        default_model: "",
        // Ollama runs locally, so it is the one provider with a concrete
        // default endpoint instead of an empty placeholder.
        default_base_url: "http://localhost:11434",
    },
];

/// Look up a built-in provider by id.
#[must_use]
pub fn built_in(id: &str) -> Option<&'static BuiltInProvider> {
    BUILT_IN_PROVIDERS.iter().find(|p| p.id == id)
}
