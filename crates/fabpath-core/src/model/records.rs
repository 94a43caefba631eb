use serde::{Deserialize, Serialize};

/// An access port block (`infraPortBlk`).
///
/// Port numbers are kept as the controller's decimal strings; the index
/// builder parses them and treats a bad value as a schema violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortBlockRecord {
    pub dn: String,
    pub from_port: String,
    pub to_port: String,
}

impl PortBlockRecord {
    /// The parent identifier: the DN without its trailing `/portblk-…` segment.
    ///
    /// A DN with no `/` is its own parent.
    pub fn parent_dn(&self) -> &str {
        self.dn.rsplit_once('/').map_or(self.dn.as_str(), |(parent, _)| parent)
    }
}

/// A static path attachment (`fvRsPathAtt`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathBindingRecord {
    pub dn: String,
    /// Raw encapsulation, e.g. `vlan-100`.
    pub encap: String,
    /// Raw mode, e.g. `regular`, `untagged`, `native`.
    pub mode: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parent_dn_strips_block_segment() {
        let rec = PortBlockRecord {
            dn: "uni/infra/accportprof-IFP1/hports-SEL-typ-range/portblk-block2".into(),
            from_port: "1".into(),
            to_port: "1".into(),
        };
        assert_eq!(
            rec.parent_dn(),
            "uni/infra/accportprof-IFP1/hports-SEL-typ-range"
        );
    }

    #[test]
    fn parent_dn_of_flat_identifier_is_itself() {
        let rec = PortBlockRecord {
            dn: "portblk-block2".into(),
            from_port: "1".into(),
            to_port: "1".into(),
        };
        assert_eq!(rec.parent_dn(), "portblk-block2");
    }
}
