// ── Identifier grammars ──
//
// Distinguished names are parsed with fixed patterns. The literal
// segments are part of the controller's schema: in particular a static
// path DN ends with a doubled `]]` (the `pathep-[...]` group closes inside
// the `rspathAtt-[...]` group), and both brackets must match.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

/// `.../accportprof-<ifp>/hports-<selector>-typ-range`
static PORT_BLOCK_PARENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"accportprof-(?P<ifp>[^/]+)/hports-(?P<selector>[^/]+)-typ-range")
        .expect("port block grammar compiles")
});

/// `.../epg-<epg>/...paths-<node>/pathep-[<target>]]`
///
/// Any number of segments, including none, may sit between the EPG and
/// the `paths-` segment.
///
/// FEX paths (`paths-<node>/extpaths-<fex>/pathep-[...]`) report the
/// parent leaf as the node.
static PATH_ENDPOINT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"/epg-(?P<epg>[^/]+)/(?:.*/)?(?:prot)?paths-(?P<node>[^/]+)(?:/extpaths-[^/]+)?/pathep-\[(?P<target>.*)\]\]$",
    )
    .expect("path endpoint grammar compiles")
});

/// Width of a leaf node id inside a dual-node identifier.
const NODE_ID_WIDTH: usize = 3;

/// Fields extracted from a port block's parent identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortBlockPath {
    /// Interface profile name.
    pub ifp: String,
    /// Port selector name.
    pub selector: String,
}

/// Fields extracted from a static path identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathEndpoint {
    pub epg: String,
    /// Node identifier as written: `101` or `201-202`.
    pub node: String,
    /// Physical interface (`eth1/5`) or port selector name.
    pub target: String,
}

impl PathEndpoint {
    /// A target containing `/` names a physical interface; anything else
    /// is a port selector.
    pub fn is_physical(&self) -> bool {
        self.target.contains('/')
    }
}

/// The leaf(s) a path is bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeSpec {
    Single(String),
    /// vPC pair: first and last three characters of `NNN-NNN`.
    Pair(String, String),
}

impl NodeSpec {
    /// Split a node identifier. Identifiers containing `-` are vPC pairs.
    pub fn parse(node: &str, dn: &str) -> Result<Self, CoreError> {
        if !node.contains('-') {
            return Ok(Self::Single(node.to_owned()));
        }
        let chars: Vec<char> = node.chars().collect();
        if chars.len() < NODE_ID_WIDTH * 2 {
            return Err(CoreError::InvalidField {
                dn: dn.to_owned(),
                field: "node",
                value: node.to_owned(),
                reason: "dual-node identifier is shorter than two node ids".into(),
            });
        }
        let first: String = chars[..NODE_ID_WIDTH].iter().collect();
        let last: String = chars[chars.len() - NODE_ID_WIDTH..].iter().collect();
        Ok(Self::Pair(first, last))
    }
}

/// Parse a port block's parent identifier.
pub fn parse_port_block(dn: &str) -> Result<PortBlockPath, CoreError> {
    let caps = PORT_BLOCK_PARENT
        .captures(dn)
        .ok_or_else(|| CoreError::IdentifierGrammar {
            class: fabpath_api::PORT_BLOCK_CLASS,
            dn: dn.to_owned(),
        })?;
    Ok(PortBlockPath {
        ifp: caps["ifp"].to_owned(),
        selector: caps["selector"].to_owned(),
    })
}

/// Parse a static path identifier.
pub fn parse_path_endpoint(dn: &str) -> Result<PathEndpoint, CoreError> {
    let caps = PATH_ENDPOINT
        .captures(dn)
        .ok_or_else(|| CoreError::IdentifierGrammar {
            class: fabpath_api::PATH_ATTACHMENT_CLASS,
            dn: dn.to_owned(),
        })?;
    Ok(PathEndpoint {
        epg: caps["epg"].to_owned(),
        node: caps["node"].to_owned(),
        target: caps["target"].to_owned(),
    })
}
