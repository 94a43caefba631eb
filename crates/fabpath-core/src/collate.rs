// ── Per-interface collation ──
//
// Folds resolved bindings into one entry per (leaf, interface): trunk
// VLANs accumulate in binding order, the access VLAN is overwritten by
// each later access binding.

use indexmap::IndexMap;
use tracing::debug;

use crate::model::{InterfaceVlanSummary, PortMode, ResolvedBinding};

/// Interface summaries keyed `"<node>__<interface>"`, in first-seen order.
pub type Collation = IndexMap<String, InterfaceVlanSummary>;

/// Collation key for a leaf/interface pair.
pub fn collation_key(node: &str, interface: &str) -> String {
    format!("{node}__{interface}")
}

pub fn collate(bindings: &[ResolvedBinding]) -> Collation {
    let mut out = Collation::new();
    for binding in bindings {
        let entry = out
            .entry(collation_key(&binding.node, &binding.interface))
            .or_insert_with(|| InterfaceVlanSummary {
                switch: binding.node.clone(),
                intf: binding.interface.clone(),
                ..InterfaceVlanSummary::default()
            });
        match binding.mode {
            PortMode::Trunk => entry.tagged.push(binding.vlan.clone()),
            PortMode::Access => {
                if !entry.untagged.is_empty() && entry.untagged != binding.vlan {
                    debug!(
                        node = %binding.node,
                        interface = %binding.interface,
                        previous = %entry.untagged,
                        vlan = %binding.vlan,
                        "untagged VLAN overwritten"
                    );
                }
                entry.untagged.clone_from(&binding.vlan);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn b(node: &str, intf: &str, vlan: &str, mode: PortMode) -> ResolvedBinding {
        ResolvedBinding {
            epg: "EPG".into(),
            vlan: vlan.into(),
            mode,
            node: node.into(),
            interface: intf.into(),
            port_channel: None,
        }
    }

    #[test]
    fn tagged_and_untagged_are_split() {
        let bindings = [
            b("101", "eth1/5", "100", PortMode::Trunk),
            b("101", "eth1/5", "200", PortMode::Trunk),
            b("101", "eth1/5", "300", PortMode::Access),
            b("102", "eth1/5", "100", PortMode::Trunk),
        ];
        let collation = collate(&bindings);
        assert_eq!(
            collation.keys().collect::<Vec<_>>(),
            vec!["101__eth1/5", "102__eth1/5"]
        );
        assert_eq!(
            collation["101__eth1/5"],
            InterfaceVlanSummary {
                switch: "101".into(),
                intf: "eth1/5".into(),
                tagged: vec!["100".into(), "200".into()],
                untagged: "300".into(),
            }
        );
        assert_eq!(collation["102__eth1/5"].untagged, "");
    }

    #[test]
    fn untagged_last_write_wins() {
        let bindings = [
            b("101", "eth1/1", "10", PortMode::Access),
            b("101", "eth1/1", "20", PortMode::Access),
        ];
        assert_eq!(collate(&bindings)["101__eth1/1"].untagged, "20");
    }

    #[test]
    fn duplicate_tagged_vlans_are_kept() {
        let bindings = [
            b("101", "eth1/1", "10", PortMode::Trunk),
            b("101", "eth1/1", "10", PortMode::Trunk),
        ];
        assert_eq!(collate(&bindings)["101__eth1/1"].tagged, vec!["10", "10"]);
    }
}
