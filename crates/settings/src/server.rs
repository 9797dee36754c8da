//! Local-state server schema.
//!
//! Browser-wide settings for the embedded network endpoints: four server
//! ports and the MCP kill-switch. Registered once per process, before any
//! server subsystem reads its port.

use browseros_prefs::{PrefError, PrefService};

use crate::error::SettingsError;

/// CDP server port (0 = auto-assign an ephemeral port at bind time).
pub const CDP_PORT_PREF: &str = "browseros.server.cdp_port";
/// MCP server port (HTTP).
pub const MCP_PORT_PREF: &str = "browseros.server.mcp_port";
/// Agent server port.
pub const AGENT_PORT_PREF: &str = "browseros.server.agent_port";
/// Extension server port.
pub const EXTENSION_PORT_PREF: &str = "browseros.server.extension_port";
/// Whether the MCP server is enabled. The other servers have no
/// kill-switch.
pub const MCP_ENABLED_PREF: &str = "browseros.server.mcp_enabled";

/// Register the local-state server preferences.
///
/// Default ports are spaced 10 apart so neighbouring local services never
/// land on adjacent ports; a new server continues the sequence (last + 10).
/// This layer supplies static defaults only — it neither probes for free
/// ports nor validates against the OS-reserved range. That belongs to the
/// server doing the bind.
pub fn register_local_state_prefs(prefs: &mut PrefService) -> Result<(), PrefError> {
    // CDP port: default 9223
    prefs.register_integer(CDP_PORT_PREF, 9223)?;

    // MCP port: default 9233
    prefs.register_integer(MCP_PORT_PREF, 9233)?;

    // Agent port: default 9243
    prefs.register_integer(AGENT_PORT_PREF, 9243)?;

    // Extension port: default 9253
    prefs.register_integer(EXTENSION_PORT_PREF, 9253)?;

    // MCP enabled
    prefs.register_boolean(MCP_ENABLED_PREF, true)?;

    Ok(())
}

/// Resolved server configuration, handed to the embedded servers at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    /// 0 means "bind an ephemeral port".
    pub cdp_port: u16,
    pub mcp_port: u16,
    pub agent_port: u16,
    pub extension_port: u16,
    pub mcp_enabled: bool,
}

impl ServerSettings {
    /// Load the current server settings from local state.
    ///
    /// A persisted port outside the u16 range is a data error, surfaced as
    /// [`SettingsError::PortOutOfRange`] instead of a panic.
    pub fn load(prefs: &PrefService) -> Result<Self, SettingsError> {
        Ok(Self {
            cdp_port: port(prefs, CDP_PORT_PREF)?,
            mcp_port: port(prefs, MCP_PORT_PREF)?,
            agent_port: port(prefs, AGENT_PORT_PREF)?,
            extension_port: port(prefs, EXTENSION_PORT_PREF)?,
            mcp_enabled: prefs.boolean(MCP_ENABLED_PREF)?,
        })
    }
}

fn port(prefs: &PrefService, key: &str) -> Result<u16, SettingsError> {
    let value = prefs.integer(key)?;
    u16::try_from(value).map_err(|_| SettingsError::PortOutOfRange {
        key: key.to_string(),
        value,
    })
}
