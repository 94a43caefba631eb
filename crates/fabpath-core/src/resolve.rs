// ── Static path resolution ──
//
// Every path attachment targets either a physical interface (`eth1/5`)
// or a port selector. Selector references are expanded through the
// index: a port-channel on one leaf becomes one binding per member port,
// a vPC becomes one binding per leaf on the selector's first port.
// References the index doesn't know are collected, never dropped.

use tracing::{debug, info, warn};

use crate::dn::{self, NodeSpec, PathEndpoint};
use crate::error::CoreError;
use crate::index::SelectorIndex;
use crate::model::{BogusBinding, PathBindingRecord, PortMode, PortSelector, ResolvedBinding};

/// Length of the encapsulation type prefix (`vlan-`).
const ENCAP_PREFIX_LEN: usize = 5;

/// Line card used when naming expanded member ports.
const INTERFACE_MODULE: u32 = 1;

/// Output of [`resolve_bindings`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    pub bindings: Vec<ResolvedBinding>,
    pub bogus: Vec<BogusBinding>,
}

/// Resolve static path records against the selector index.
///
/// Output order follows input order; expanded ports come out in
/// ascending port order, vPC legs in node-id order as written.
pub fn resolve_bindings<'a>(
    records: impl IntoIterator<Item = &'a PathBindingRecord>,
    index: &SelectorIndex,
) -> Result<Resolution, CoreError> {
    let mut out = Resolution::default();
    for record in records {
        resolve_one(record, index, &mut out)?;
    }
    info!(
        bindings = out.bindings.len(),
        bogus = out.bogus.len(),
        "static paths resolved"
    );
    Ok(out)
}

fn resolve_one(
    record: &PathBindingRecord,
    index: &SelectorIndex,
    out: &mut Resolution,
) -> Result<(), CoreError> {
    let endpoint = dn::parse_path_endpoint(&record.dn)?;
    let vlan = vlan_from_encap(&record.dn, &record.encap)?;
    let mode = PortMode::from_raw(&record.mode);

    if endpoint.is_physical() {
        out.bindings.push(ResolvedBinding {
            epg: endpoint.epg,
            vlan,
            mode,
            node: endpoint.node,
            interface: endpoint.target,
            port_channel: None,
        });
        return Ok(());
    }

    let Some(selector) = index.get(&endpoint.target) else {
        warn!(
            epg = %endpoint.epg,
            node = %endpoint.node,
            selector = %endpoint.target,
            "static path references an unknown port selector"
        );
        out.bogus.push(BogusBinding {
            epg: endpoint.epg,
            node: endpoint.node,
            selector: endpoint.target,
            dn: record.dn.clone(),
        });
        return Ok(());
    };

    let nodes = NodeSpec::parse(&endpoint.node, &record.dn)?;
    expand(&endpoint, &nodes, selector, &vlan, mode, &mut out.bindings);
    Ok(())
}

/// Expand a selector reference into physical bindings.
fn expand(
    endpoint: &PathEndpoint,
    nodes: &NodeSpec,
    selector: &PortSelector,
    vlan: &str,
    mode: PortMode,
    bindings: &mut Vec<ResolvedBinding>,
) {
    let bind = |node: &str, port: u32| ResolvedBinding {
        epg: endpoint.epg.clone(),
        vlan: vlan.to_owned(),
        mode,
        node: node.to_owned(),
        interface: interface_name(port),
        port_channel: Some(selector.name.clone()),
    };

    match nodes {
        NodeSpec::Single(node) => {
            debug!(selector = %selector.name, node = %node, ports = selector.port_count(), "expanding port-channel");
            bindings.extend((selector.from_port..=selector.to_port).map(|port| bind(node, port)));
        }
        NodeSpec::Pair(first, second) => {
            // Each vPC leg uses the selector's first port only.
            if selector.to_port > selector.from_port {
                debug!(
                    selector = %selector.name,
                    to_port = selector.to_port,
                    "vPC selector spans several ports; using fromPort only"
                );
            }
            bindings.push(bind(first, selector.from_port));
            bindings.push(bind(second, selector.from_port));
        }
    }
}

/// Fixed-module interface name for an expanded member port.
pub fn interface_name(port: u32) -> String {
    format!("eth{INTERFACE_MODULE}/{port}")
}

/// Strip the encapsulation type prefix: `vlan-100` → `100`.
pub fn vlan_from_encap(dn: &str, encap: &str) -> Result<String, CoreError> {
    match encap.get(ENCAP_PREFIX_LEN..) {
        Some(vlan) if !vlan.is_empty() => Ok(vlan.to_owned()),
        _ => Err(CoreError::InvalidField {
            dn: dn.to_owned(),
            field: "encap",
            value: encap.to_owned(),
            reason: "expected a `vlan-<id>` encapsulation".into(),
        }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::index::IndexPolicy;
    use crate::model::PortBlockRecord;

    fn index() -> SelectorIndex {
        let blocks = [
            PortBlockRecord {
                dn: "uni/infra/accportprof-IFP1/hports-PC-SEL1-typ-range/portblk-block2".into(),
                from_port: "1".into(),
                to_port: "3".into(),
            },
            PortBlockRecord {
                dn: "uni/infra/accportprof-201_202_ifp/hports-VPC-SEL1-typ-range/portblk-block2"
                    .into(),
                from_port: "10".into(),
                to_port: "10".into(),
            },
            PortBlockRecord {
                dn: "uni/infra/accportprof-301_302_ifp/hports-VPC-WIDE-typ-range/portblk-block2"
                    .into(),
                from_port: "20".into(),
                to_port: "23".into(),
            },
        ];
        SelectorIndex::build(&blocks, &IndexPolicy::default()).unwrap()
    }

    fn path(epg: &str, paths: &str, target: &str, encap: &str, mode: &str) -> PathBindingRecord {
        PathBindingRecord {
            dn: format!("uni/tn-T1/ap-AP1/epg-{epg}/rspathAtt-[topology/pod-1/{paths}/pathep-[{target}]]"),
            encap: encap.into(),
            mode: mode.into(),
        }
    }

    fn binding(node: &str, interface: &str, pc: Option<&str>) -> ResolvedBinding {
        ResolvedBinding {
            epg: String::new(),
            vlan: String::new(),
            mode: PortMode::Access,
            node: node.into(),
            interface: interface.into(),
            port_channel: pc.map(String::from),
        }
    }

    #[test]
    fn direct_physical_binding() {
        let records = [path("WEB", "paths-101", "eth1/5", "vlan-100", "regular")];
        let res = resolve_bindings(&records, &index()).unwrap();
        assert_eq!(
            res.bindings,
            vec![ResolvedBinding {
                epg: "WEB".into(),
                vlan: "100".into(),
                mode: PortMode::Trunk,
                node: "101".into(),
                interface: "eth1/5".into(),
                port_channel: None,
            }]
        );
        assert_eq!(res.bindings[0].port_channel_label(), "none");
        assert!(res.bogus.is_empty());
    }

    #[test]
    fn port_channel_expands_to_every_member_port() {
        let records = [path("APP", "paths-102", "PC-SEL1", "vlan-50", "untagged")];
        let res = resolve_bindings(&records, &index()).unwrap();
        assert_eq!(res.bindings.len(), 3);
        let got: Vec<_> = res
            .bindings
            .iter()
            .map(|b| (b.node.as_str(), b.interface.as_str(), b.port_channel_label()))
            .collect();
        assert_eq!(
            got,
            vec![
                ("102", "eth1/1", "PC-SEL1"),
                ("102", "eth1/2", "PC-SEL1"),
                ("102", "eth1/3", "PC-SEL1"),
            ]
        );
        assert!(res.bindings.iter().all(|b| b.mode == PortMode::Access));
        assert!(res.bindings.iter().all(|b| b.vlan == "50" && b.epg == "APP"));
    }

    #[test]
    fn vpc_expands_to_one_binding_per_leaf() {
        let records = [path("DB", "protpaths-201-202", "VPC-SEL1", "vlan-30", "regular")];
        let res = resolve_bindings(&records, &index()).unwrap();
        let got: Vec<_> = res
            .bindings
            .iter()
            .map(|b| binding(&b.node, &b.interface, b.port_channel.as_deref()))
            .collect();
        assert_eq!(
            got,
            vec![
                binding("201", "eth1/10", Some("VPC-SEL1")),
                binding("202", "eth1/10", Some("VPC-SEL1")),
            ]
        );
    }

    #[test]
    fn vpc_ignores_range_upper_bound() {
        let records = [path("DB", "protpaths-301-302", "VPC-WIDE", "vlan-31", "regular")];
        let res = resolve_bindings(&records, &index()).unwrap();
        assert_eq!(res.bindings.len(), 2);
        assert!(res.bindings.iter().all(|b| b.interface == "eth1/20"));
    }

    #[test]
    fn unknown_selector_is_bogus_not_fatal() {
        let records = [
            path("WEB", "paths-101", "GHOST", "vlan-100", "regular"),
            path("WEB", "paths-101", "eth1/6", "vlan-100", "regular"),
        ];
        let res = resolve_bindings(&records, &index()).unwrap();
        assert_eq!(res.bogus.len(), 1);
        assert_eq!(res.bogus[0].selector, "GHOST");
        assert_eq!(res.bogus[0].node, "101");
        assert_eq!(res.bogus[0].epg, "WEB");
        assert_eq!(res.bindings.len(), 1);
        assert!(res.bindings.iter().all(|b| b.port_channel.as_deref() != Some("GHOST")));
    }

    #[test]
    fn bad_identifier_aborts() {
        let records = [PathBindingRecord {
            dn: "uni/tn-T1/ap-AP1/epg-WEB/rspathAtt-[topology/pod-1/paths-101/pathep-[eth1/5]"
                .into(),
            encap: "vlan-100".into(),
            mode: "regular".into(),
        }];
        let err = resolve_bindings(&records, &index()).unwrap_err();
        assert!(err.is_schema_violation());
    }

    #[test]
    fn encap_prefix_is_stripped() {
        assert_eq!(vlan_from_encap("dn", "vlan-100").unwrap(), "100");
        assert_eq!(vlan_from_encap("dn", "vlan-4094").unwrap(), "4094");
        assert!(vlan_from_encap("dn", "vlan").is_err());
        assert!(vlan_from_encap("dn", "vlan-").is_err());
    }

    #[test]
    fn resolution_is_reproducible() {
        let records = [
            path("WEB", "paths-101", "eth1/5", "vlan-100", "regular"),
            path("APP", "paths-102", "PC-SEL1", "vlan-50", "untagged"),
            path("DB", "protpaths-201-202", "VPC-SEL1", "vlan-30", "regular"),
            path("DB", "paths-101", "GHOST", "vlan-30", "regular"),
        ];
        let idx = index();
        let first = resolve_bindings(&records, &idx).unwrap();
        let second = resolve_bindings(&records, &idx).unwrap();
        assert_eq!(first, second);
    }
}
