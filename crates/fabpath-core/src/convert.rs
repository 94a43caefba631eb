// ── API-to-domain conversions ──
//
// Lifts untyped `ManagedObject`s into the raw record types. A missing
// attribute means the controller answered with a schema this tool
// doesn't understand, so it is an error rather than a default.

use fabpath_api::{ManagedObject, PATH_ATTACHMENT_CLASS, PORT_BLOCK_CLASS};

use crate::error::CoreError;
use crate::model::{PathBindingRecord, PortBlockRecord};

fn required(
    mo: &ManagedObject,
    class: &'static str,
    attribute: &'static str,
) -> Result<String, CoreError> {
    mo.attr(attribute)
        .map(str::to_owned)
        .ok_or_else(|| CoreError::MissingAttribute {
            class,
            dn: mo.dn().unwrap_or("<no dn>").to_owned(),
            attribute,
        })
}

impl TryFrom<&ManagedObject> for PortBlockRecord {
    type Error = CoreError;

    fn try_from(mo: &ManagedObject) -> Result<Self, Self::Error> {
        Ok(Self {
            dn: required(mo, PORT_BLOCK_CLASS, "dn")?,
            from_port: required(mo, PORT_BLOCK_CLASS, "fromPort")?,
            to_port: required(mo, PORT_BLOCK_CLASS, "toPort")?,
        })
    }
}

impl TryFrom<&ManagedObject> for PathBindingRecord {
    type Error = CoreError;

    fn try_from(mo: &ManagedObject) -> Result<Self, Self::Error> {
        Ok(Self {
            dn: required(mo, PATH_ATTACHMENT_CLASS, "dn")?,
            encap: required(mo, PATH_ATTACHMENT_CLASS, "encap")?,
            mode: required(mo, PATH_ATTACHMENT_CLASS, "mode")?,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn port_block_from_object() {
        let mo = ManagedObject::new(PORT_BLOCK_CLASS)
            .with_attr("dn", "uni/infra/accportprof-A/hports-S-typ-range/portblk-b")
            .with_attr("fromPort", "1")
            .with_attr("toPort", "4")
            .with_attr("fromCard", "1");
        let rec = PortBlockRecord::try_from(&mo).unwrap();
        assert_eq!(rec.from_port, "1");
        assert_eq!(rec.to_port, "4");
    }

    #[test]
    fn missing_attribute_names_the_object() {
        let mo = ManagedObject::new(PATH_ATTACHMENT_CLASS)
            .with_attr("dn", "uni/tn-T/ap-A/epg-E/rspathAtt-[x]")
            .with_attr("encap", "vlan-10");
        let err = PathBindingRecord::try_from(&mo).unwrap_err();
        assert!(matches!(err, CoreError::MissingAttribute { attribute: "mode", .. }));
        assert!(err.to_string().contains("epg-E"));
    }
}
