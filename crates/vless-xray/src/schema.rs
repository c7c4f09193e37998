//! Typed schema for the slice of the xray config the bridge touches.
//!
//! Only the `inbounds[].settings.clients` path is modeled; everything
//! else in the document round-trips untouched through flattened
//! passthrough maps, so rewriting the file never drops fields the
//! bridge does not know about.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use vless_core::defaults;

/// The xray daemon configuration document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct XrayDocument {
    #[serde(default)]
    pub inbounds: Vec<Inbound>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One inbound definition.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Inbound {
    #[serde(default)]
    pub settings: InboundSettings,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Inbound settings holding the client allow-list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InboundSettings {
    #[serde(default)]
    pub clients: Vec<XrayClient>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One client allow-list entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XrayClient {
    pub id: Uuid,
    pub flow: String,
    pub email: String,
}

impl XrayClient {
    /// Create an entry with the fixed XTLS flow.
    pub fn new(id: Uuid, email: impl Into<String>) -> Self {
        Self {
            id,
            flow: defaults::VLESS_FLOW.to_string(),
            email: email.into(),
        }
    }
}

impl XrayDocument {
    /// Client list of the first inbound, if the document has one.
    pub fn client_list(&self) -> Option<&Vec<XrayClient>> {
        self.inbounds.first().map(|inbound| &inbound.settings.clients)
    }

    /// Mutable client list of the first inbound.
    pub fn client_list_mut(&mut self) -> Option<&mut Vec<XrayClient>> {
        self.inbounds
            .first_mut()
            .map(|inbound| &mut inbound.settings.clients)
    }
}
