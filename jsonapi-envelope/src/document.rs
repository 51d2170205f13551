use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Top-level navigation links. A `None` value is written as `null`.
pub type Links = BTreeMap<String, Option<String>>;

/// A domain value that can be written as a JSON:API resource object.
pub trait ResourceObject {
    /// Value of `data.type`.
    const TYPE: &'static str;

    type Attributes: Serialize;

    fn resource_id(&self) -> String;

    fn attributes(&self) -> Self::Attributes;

    fn to_resource(&self) -> Resource<Self::Attributes> {
        Resource {
            id: Some(self.resource_id()),
            kind: Self::TYPE.to_string(),
            attributes: self.attributes(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource<A> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub attributes: A,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document<D> {
    pub data: D,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

impl<D> Document<D> {
    pub fn new(data: D) -> Self {
        Self {
            data,
            links: None,
            meta: None,
        }
    }

    pub fn with_links(mut self, links: Links) -> Self {
        self.links = Some(links);
        self
    }

    pub fn with_meta(mut self, meta: Value) -> Self {
        self.meta = Some(meta);
        self
    }
}

impl<A> Document<Resource<A>> {
    pub fn single<R>(resource: &R) -> Self
    where
        R: ResourceObject<Attributes = A>,
    {
        Self::new(resource.to_resource())
    }
}

impl<A> Document<Vec<Resource<A>>> {
    pub fn collection<R>(resources: &[R]) -> Self
    where
        R: ResourceObject<Attributes = A>,
    {
        Self::new(resources.iter().map(ResourceObject::to_resource).collect())
    }
}

// ── Request side ──────────────────────────────────────────────────────────────

/// Incoming document. Every member is optional so handlers can turn a missing
/// piece into a validation error instead of a generic parse failure.
#[derive(Debug, Clone, Deserialize)]
pub struct RequestDocument<A> {
    pub data: Option<RequestResource<A>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RequestResource<A> {
    /// Kept raw: clients send ids both as strings and as numbers.
    #[serde(default)]
    pub id: Option<Value>,
    pub attributes: Option<A>,
}

impl<A> RequestDocument<A> {
    pub fn into_attributes(self) -> Option<A> {
        self.data.and_then(|d| d.attributes)
    }

    /// `data.id` rendered as text, `None` when missing or null.
    pub fn id_text(&self) -> Option<String> {
        match self.data.as_ref()?.id.as_ref()? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Gizmo {
        id: i64,
        label: String,
    }

    #[derive(Serialize)]
    struct GizmoAttributes {
        label: String,
    }

    impl ResourceObject for Gizmo {
        const TYPE: &'static str = "gizmos";
        type Attributes = GizmoAttributes;

        fn resource_id(&self) -> String {
            self.id.to_string()
        }

        fn attributes(&self) -> GizmoAttributes {
            GizmoAttributes {
                label: self.label.clone(),
            }
        }
    }

    #[test]
    fn single_document_wraps_id_type_and_attributes() {
        let doc = Document::single(&Gizmo {
            id: 7,
            label: "spring".into(),
        });
        assert_eq!(
            serde_json::to_value(&doc).unwrap(),
            json!({ "data": { "id": "7", "type": "gizmos", "attributes": { "label": "spring" } } })
        );
    }

    #[test]
    fn collection_document_keeps_null_links_and_meta() {
        let mut links = Links::new();
        links.insert("next".into(), None);
        links.insert("self".into(), Some("/gizmos?page=0".into()));
        let doc = Document::collection(&[Gizmo {
            id: 1,
            label: "a".into(),
        }])
        .with_links(links)
        .with_meta(json!({ "totalElements": 1 }));

        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["data"].as_array().unwrap().len(), 1);
        assert!(value["links"]["next"].is_null());
        assert_eq!(value["links"]["self"], "/gizmos?page=0");
        assert_eq!(value["meta"]["totalElements"], 1);
    }

    #[test]
    fn empty_collection_omits_links_when_unset() {
        let doc = Document::<Vec<Resource<GizmoAttributes>>>::collection::<Gizmo>(&[]);
        assert_eq!(serde_json::to_value(&doc).unwrap(), json!({ "data": [] }));
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Qty {
        quantity: Option<i32>,
    }

    #[test]
    fn request_id_accepts_string_or_number() {
        let s: RequestDocument<Qty> =
            serde_json::from_value(json!({ "data": { "id": "12", "attributes": {} } })).unwrap();
        let n: RequestDocument<Qty> =
            serde_json::from_value(json!({ "data": { "id": 12, "attributes": {} } })).unwrap();
        assert_eq!(s.id_text().as_deref(), Some("12"));
        assert_eq!(n.id_text().as_deref(), Some("12"));
    }

    #[test]
    fn request_without_data_has_no_attributes() {
        let doc: RequestDocument<Qty> = serde_json::from_value(json!({})).unwrap();
        assert!(doc.id_text().is_none());
        assert!(doc.into_attributes().is_none());
    }

    #[test]
    fn request_attributes_are_extracted() {
        let doc: RequestDocument<Qty> = serde_json::from_value(
            json!({ "data": { "type": "inventories", "attributes": { "quantity": 4 } } }),
        )
        .unwrap();
        assert_eq!(doc.into_attributes(), Some(Qty { quantity: Some(4) }));
    }
}
