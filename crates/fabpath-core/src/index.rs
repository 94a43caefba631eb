// ── Port-selector index ──
//
// Built from access port blocks. Only selectors that back a logical
// port-channel are kept: a range of two or more ports, or an interface
// profile named for a leaf pair. Single-port selectors on ordinary
// profiles are plain access ports, already reported through their
// physical path bindings. An inverted range on an ordinary profile spans
// no ports and is skipped the same way.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::dn;
use crate::error::CoreError;
use crate::model::{PortBlockRecord, PortSelector, SelectorKind};

/// Rules for recognising a dual-homed interface profile by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexPolicy {
    /// Trailing characters of the profile name reserved for a type tag
    /// (e.g. `_ifp`); ignored when looking for a marker.
    pub profile_suffix_len: usize,
    /// Substrings that mark a profile as spanning a vPC leaf pair.
    pub dual_homed_markers: Vec<String>,
}

impl Default for IndexPolicy {
    fn default() -> Self {
        Self {
            profile_suffix_len: 4,
            dual_homed_markers: vec!["_".into()],
        }
    }
}

impl IndexPolicy {
    /// Whether an interface profile name carries a dual-homed marker.
    ///
    /// `201_202_ifp` → stem `201_202` → marked; `101_ifp` → stem `101` → not.
    pub fn is_dual_homed(&self, ifp: &str) -> bool {
        let keep = ifp.chars().count().saturating_sub(self.profile_suffix_len);
        let stem: String = ifp.chars().take(keep).collect();
        self.dual_homed_markers
            .iter()
            .any(|marker| !marker.is_empty() && stem.contains(marker.as_str()))
    }
}

/// Selector name → port selector, for selectors that back a port-channel.
#[derive(Debug, Clone, Default)]
pub struct SelectorIndex {
    selectors: BTreeMap<String, PortSelector>,
}

impl SelectorIndex {
    /// Build the index from port block records.
    ///
    /// A record whose identifier doesn't match the grammar, or whose port
    /// numbers don't parse, aborts the build. An inverted range is not an
    /// error: it is skipped on an ordinary profile and kept on a dual-homed
    /// one, where only `from_port` is used. When the same selector name
    /// shows up in several records the last one wins.
    pub fn build<'a>(
        records: impl IntoIterator<Item = &'a PortBlockRecord>,
        policy: &IndexPolicy,
    ) -> Result<Self, CoreError> {
        let mut selectors = BTreeMap::new();
        let mut seen = 0usize;

        for record in records {
            seen += 1;
            let path = dn::parse_port_block(record.parent_dn())?;
            let from_port = parse_port(&record.dn, "fromPort", &record.from_port)?;
            let to_port = parse_port(&record.dn, "toPort", &record.to_port)?;

            let dual_homed = policy.is_dual_homed(&path.ifp);
            if !dual_homed && to_port <= from_port {
                if to_port < from_port {
                    warn!(
                        selector = %path.selector,
                        from_port,
                        to_port,
                        "skipping port selector with inverted range"
                    );
                } else {
                    debug!(selector = %path.selector, "skipping single-port access selector");
                }
                continue;
            }

            let selector = PortSelector {
                name: path.selector.clone(),
                interface_profile: path.ifp,
                from_port,
                to_port,
                kind: if dual_homed {
                    SelectorKind::VirtualPortChannel
                } else {
                    SelectorKind::PortChannel
                },
            };
            if let Some(previous) = selectors.insert(path.selector, selector) {
                warn!(
                    selector = %previous.name,
                    replaced_profile = %previous.interface_profile,
                    "duplicate port selector name; keeping the last one"
                );
            }
        }

        info!(blocks = seen, selectors = selectors.len(), "port selector index built");
        Ok(Self { selectors })
    }

    pub fn get(&self, name: &str) -> Option<&PortSelector> {
        self.selectors.get(name)
    }

    pub fn len(&self) -> usize {
        self.selectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }

    /// Selectors in name order.
    pub fn iter(&self) -> impl Iterator<Item = &PortSelector> {
        self.selectors.values()
    }
}

fn parse_port(dn: &str, field: &'static str, raw: &str) -> Result<u32, CoreError> {
    raw.trim().parse().map_err(|e| CoreError::InvalidField {
        dn: dn.to_owned(),
        field,
        value: raw.to_owned(),
        reason: format!("{e}"),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn block(ifp: &str, selector: &str, from: &str, to: &str) -> PortBlockRecord {
        PortBlockRecord {
            dn: format!("uni/infra/accportprof-{ifp}/hports-{selector}-typ-range/portblk-block2"),
            from_port: from.into(),
            to_port: to.into(),
        }
    }

    #[test]
    fn multi_port_range_is_indexed() {
        let records = [block("IFP1", "PC-SEL1", "1", "3")];
        let index = SelectorIndex::build(&records, &IndexPolicy::default()).unwrap();
        let sel = index.get("PC-SEL1").unwrap();
        assert_eq!(sel.interface_profile, "IFP1");
        assert_eq!((sel.from_port, sel.to_port), (1, 3));
        assert_eq!(sel.kind, SelectorKind::PortChannel);
        assert_eq!(sel.port_count(), 3);
    }

    #[test]
    fn single_port_unmarked_selector_is_excluded() {
        let records = [
            block("101_ifp", "ACCESS-1", "5", "5"),
            block("LEAF101", "ACCESS-2", "6", "6"),
        ];
        let index = SelectorIndex::build(&records, &IndexPolicy::default()).unwrap();
        assert!(index.is_empty());
    }

    #[test]
    fn single_port_dual_homed_selector_is_included() {
        let records = [block("201_202_ifp", "VPC-SEL1", "10", "10")];
        let index = SelectorIndex::build(&records, &IndexPolicy::default()).unwrap();
        let sel = index.get("VPC-SEL1").unwrap();
        assert_eq!(sel.kind, SelectorKind::VirtualPortChannel);
        assert_eq!(sel.from_port, 10);
    }

    #[test]
    fn marker_inside_suffix_is_ignored() {
        let policy = IndexPolicy::default();
        assert!(!policy.is_dual_homed("101_ifp"));
        assert!(policy.is_dual_homed("201_202_ifp"));
        assert!(!policy.is_dual_homed("_if"));
    }

    #[test]
    fn custom_markers() {
        let policy = IndexPolicy {
            profile_suffix_len: 0,
            dual_homed_markers: vec!["esx".into(), "vpc".into()],
        };
        assert!(policy.is_dual_homed("esx-cluster"));
        assert!(policy.is_dual_homed("leaf-vpc"));
        assert!(!policy.is_dual_homed("leaf-101"));
    }

    #[test]
    fn duplicate_selector_last_write_wins() {
        let records = [
            block("IFP1", "PC-DUP", "1", "2"),
            block("IFP2", "PC-DUP", "7", "9"),
        ];
        let index = SelectorIndex::build(&records, &IndexPolicy::default()).unwrap();
        assert_eq!(index.len(), 1);
        let sel = index.get("PC-DUP").unwrap();
        assert_eq!(sel.interface_profile, "IFP2");
        assert_eq!((sel.from_port, sel.to_port), (7, 9));
    }

    #[test]
    fn malformed_identifier_is_fatal() {
        let records = [PortBlockRecord {
            dn: "uni/infra/funcprof/accbundle-x/portblk-block2".into(),
            from_port: "1".into(),
            to_port: "2".into(),
        }];
        let err = SelectorIndex::build(&records, &IndexPolicy::default()).unwrap_err();
        assert!(err.is_schema_violation());
        assert!(err.to_string().contains("accbundle-x"));
    }

    #[test]
    fn malformed_port_number_is_fatal() {
        let records = [block("IFP1", "PC-SEL1", "one", "3")];
        let err = SelectorIndex::build(&records, &IndexPolicy::default()).unwrap_err();
        assert!(matches!(err, CoreError::InvalidField { field: "fromPort", .. }));
    }

    #[test]
    fn inverted_range_on_plain_profile_is_skipped() {
        let records = [
            block("IFP1", "PC-INV", "4", "2"),
            block("IFP1", "PC-SEL1", "1", "2"),
        ];
        let index = SelectorIndex::build(&records, &IndexPolicy::default()).unwrap();
        assert!(index.get("PC-INV").is_none());
        assert!(index.get("PC-SEL1").is_some());
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn inverted_range_on_dual_homed_profile_is_kept() {
        let records = [block("201_202_ifp", "VPC-INV", "12", "10")];
        let index = SelectorIndex::build(&records, &IndexPolicy::default()).unwrap();
        let sel = index.get("VPC-INV").unwrap();
        assert_eq!(sel.kind, SelectorKind::VirtualPortChannel);
        assert_eq!(sel.from_port, 12);
        assert_eq!(sel.port_count(), 1);
    }
}
