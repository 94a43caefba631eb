// Controller response envelope and managed-object records.
//
// Every REST response is wrapped as
// `{ "totalCount": "N", "imdata": [ { "<class>": { "attributes": {...} } } ] }`.
// Errors reuse the same envelope with the pseudo-class `error`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Pseudo-class the controller uses for error objects inside `imdata`.
pub const ERROR_CLASS: &str = "error";

/// The `{ totalCount, imdata }` envelope.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ImData {
    #[serde(rename = "totalCount", default)]
    pub total_count: Option<String>,
    #[serde(default)]
    pub imdata: Vec<BTreeMap<String, MoBody>>,
}

/// Body of a single managed object: its attribute bag.
///
/// Child objects are not requested by any query this crate issues, so
/// they are dropped during deserialization.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MoBody {
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

/// An unstructured managed object: class name plus string attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagedObject {
    pub class: String,
    pub attributes: BTreeMap<String, String>,
}

impl ManagedObject {
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Builder-style attribute setter.
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Look up a single attribute.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// The object's distinguished name.
    pub fn dn(&self) -> Option<&str> {
        self.attr("dn")
    }
}

/// Attributes of an `error` object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorObject {
    pub code: String,
    pub text: String,
}

impl ImData {
    /// Wrap a set of objects back into the controller envelope.
    ///
    /// Used to persist class-query results in the same shape the
    /// controller returns them.
    pub fn from_objects(objects: &[ManagedObject]) -> Self {
        Self {
            total_count: Some(objects.len().to_string()),
            imdata: objects
                .iter()
                .map(|mo| {
                    let mut entry = BTreeMap::new();
                    entry.insert(
                        mo.class.clone(),
                        MoBody {
                            attributes: mo.attributes.clone(),
                        },
                    );
                    entry
                })
                .collect(),
        }
    }

    /// The first `error` object in the envelope, if any.
    pub fn error(&self) -> Option<ErrorObject> {
        self.imdata
            .iter()
            .find_map(|entry| entry.get(ERROR_CLASS))
            .map(|body| ErrorObject {
                code: body.attributes.get("code").cloned().unwrap_or_default(),
                text: body.attributes.get("text").cloned().unwrap_or_default(),
            })
    }

    /// Flatten the envelope into managed objects, skipping `error` entries.
    pub fn into_objects(self) -> Vec<ManagedObject> {
        self.imdata
            .into_iter()
            .flat_map(BTreeMap::into_iter)
            .filter(|(class, _)| class != ERROR_CLASS)
            .map(|(class, body)| ManagedObject {
                class,
                attributes: body.attributes,
            })
            .collect()
    }
}

/// Parse a raw response body into the envelope.
pub fn parse_imdata(body: &str) -> Result<ImData, crate::Error> {
    serde_json::from_str(body).map_err(|e| {
        let preview: String = body.chars().take(200).collect();
        crate::Error::Deserialization {
            message: format!("{e} (body preview: {preview:?})"),
            body: body.to_owned(),
        }
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn envelope_flattens_to_objects() {
        let body = r#"{
            "totalCount": "2",
            "imdata": [
                {"infraPortBlk": {"attributes": {"dn": "uni/a", "fromPort": "1"}}},
                {"infraPortBlk": {"attributes": {"dn": "uni/b", "fromPort": "7"}, "children": []}}
            ]
        }"#;
        let objects = parse_imdata(body).unwrap().into_objects();
        assert_eq!(objects.len(), 2);
        assert_eq!(objects[0].class, "infraPortBlk");
        assert_eq!(objects[1].dn(), Some("uni/b"));
        assert_eq!(objects[1].attr("fromPort"), Some("7"));
    }

    #[test]
    fn error_object_is_detected() {
        let body = r#"{"totalCount":"1","imdata":[{"error":{"attributes":{"code":"400","text":"Request failed, unresolved class for fvBogus"}}}]}"#;
        let envelope = parse_imdata(body).unwrap();
        let err = envelope.error().unwrap();
        assert_eq!(err.code, "400");
        assert!(err.text.contains("unresolved class"));
        assert!(envelope.into_objects().is_empty());
    }

    #[test]
    fn from_objects_wraps_in_envelope() {
        let mo = ManagedObject::new("fvRsPathAtt")
            .with_attr("dn", "uni/tn-t/ap-a/epg-e")
            .with_attr("encap", "vlan-10");
        let envelope = ImData::from_objects(std::slice::from_ref(&mo));
        assert_eq!(envelope.total_count.as_deref(), Some("1"));
        assert_eq!(envelope.into_objects(), vec![mo]);
    }

    #[test]
    fn garbage_body_is_a_deserialization_error() {
        let err = parse_imdata("<html>not json</html>").unwrap_err();
        assert!(matches!(err, crate::Error::Deserialization { .. }));
    }
}
