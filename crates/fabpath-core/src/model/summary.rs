use serde::{Deserialize, Serialize};

/// VLANs carried by one physical interface on one leaf.
///
/// Field names match the collated JSON report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceVlanSummary {
    pub switch: String,
    pub intf: String,
    /// Trunk VLANs in binding order; duplicates are kept.
    pub tagged: Vec<String>,
    /// Access VLAN, empty when none. The last access binding wins.
    pub untagged: String,
}
