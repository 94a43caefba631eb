use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// VLAN tagging mode of a static path binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PortMode {
    /// Tagged (`regular` on the controller).
    Trunk,
    /// Untagged or native.
    Access,
}

impl PortMode {
    /// Classify a raw mode string: anything containing `regular` is a trunk.
    pub fn from_raw(raw: &str) -> Self {
        if raw.contains("regular") {
            Self::Trunk
        } else {
            Self::Access
        }
    }
}

/// A binding of an EPG/VLAN to one physical interface on one leaf.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolvedBinding {
    pub epg: String,
    /// Numeric VLAN id, without the encapsulation prefix.
    pub vlan: String,
    pub mode: PortMode,
    /// Single leaf node id.
    pub node: String,
    /// Physical interface, e.g. `eth1/5`.
    pub interface: String,
    /// Port selector the binding was expanded from; `None` for direct
    /// physical bindings.
    pub port_channel: Option<String>,
}

impl ResolvedBinding {
    /// Port-channel column value: selector name or `none`.
    pub fn port_channel_label(&self) -> &str {
        self.port_channel.as_deref().unwrap_or("none")
    }
}

/// A static path binding whose port selector is missing from the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BogusBinding {
    pub epg: String,
    /// Node identifier as written in the path, single or `NNN-NNN`.
    pub node: String,
    pub selector: String,
    pub dn: String,
}

impl fmt::Display for BogusBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "EPG: {} Node(s): {} port selector: {}",
            self.epg, self.node, self.selector
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_classification() {
        assert_eq!(PortMode::from_raw("regular"), PortMode::Trunk);
        assert_eq!(PortMode::from_raw("untagged"), PortMode::Access);
        assert_eq!(PortMode::from_raw("native"), PortMode::Access);
        assert_eq!(PortMode::from_raw(""), PortMode::Access);
    }

    #[test]
    fn mode_display_is_lowercase() {
        assert_eq!(PortMode::Trunk.to_string(), "trunk");
        assert_eq!(PortMode::Access.to_string(), "access");
    }

    #[test]
    fn bogus_display_line() {
        let bogus = BogusBinding {
            epg: "DB".into(),
            node: "201-202".into(),
            selector: "GHOST".into(),
            dn: String::new(),
        };
        assert_eq!(
            bogus.to_string(),
            "EPG: DB Node(s): 201-202 port selector: GHOST"
        );
    }
}
