//! Settings error types.

/// Errors produced when loading or resolving BrowserOS settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The requested provider has no entry in the structured registry, the
    /// legacy keys, or the custom-providers list. A normal outcome ("no
    /// credentials available"), distinct from a parse error.
    #[error("provider {0:?} is not configured")]
    NotConfigured(String),

    /// Underlying preference registry error — a programmer error the
    /// embedder treats as fatal.
    #[error(transparent)]
    Pref(#[from] browseros_prefs::PrefError),

    /// JSON serialization error while writing a structured document.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// A persisted port value does not fit the valid port range.
    #[error("port pref {key:?} holds {value}, outside the 0-65535 range")]
    PortOutOfRange { key: String, value: i64 },
}
