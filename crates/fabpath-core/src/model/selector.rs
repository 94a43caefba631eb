use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// What kind of aggregate a port selector backs, judged from its
/// interface profile's name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum SelectorKind {
    /// Port-channel on a single leaf.
    PortChannel,
    /// Dual-homed (vPC) port-channel; the profile name carries a marker.
    VirtualPortChannel,
}

/// A port selector that backs a logical port-channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortSelector {
    pub name: String,
    /// Owning interface profile (`accportprof-<name>`).
    pub interface_profile: String,
    pub from_port: u32,
    pub to_port: u32,
    pub kind: SelectorKind,
}

impl PortSelector {
    /// Number of physical ports the selector spans. An inverted range
    /// counts as its first port only.
    pub fn port_count(&self) -> u32 {
        self.to_port.saturating_sub(self.from_port) + 1
    }
}
