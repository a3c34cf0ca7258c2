//! Request body builder.

use std::collections::BTreeMap;

use serde_json::Value;

use super::document::{Document, Id, Relationship, Resource};

/// Builds the `{ "data": { ... } }` envelope sent on create and update.
///
/// The resource type is always a literal supplied by the resource module.
/// No `id` is emitted unless [`id`](Self::id) is called, which is what
/// creation requests need since the server assigns ids.
///
/// ```
/// use cycleapi::jsonapi::FormattedDoc;
///
/// let doc = FormattedDoc::new("widgets")
///     .attributes(serde_json::json!({ "name": "a" }))
///     .build();
///
/// assert_eq!(
///     serde_json::to_value(&doc).unwrap(),
///     serde_json::json!({ "data": { "type": "widgets", "attributes": { "name": "a" } } })
/// );
/// ```
#[derive(Debug, Clone)]
pub struct FormattedDoc<A = Value> {
    kind: &'static str,
    id: Option<Id>,
    attributes: Option<A>,
    relationships: BTreeMap<String, Relationship>,
}

impl FormattedDoc {
    /// Start a document for a resource of type `kind`.
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            id: None,
            attributes: None,
            relationships: BTreeMap::new(),
        }
    }
}

impl<A> FormattedDoc<A> {
    /// Set the resource id (updates only).
    pub fn id(mut self, id: impl Into<Id>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the attribute bag.
    pub fn attributes<B>(self, attributes: B) -> FormattedDoc<B> {
        FormattedDoc {
            kind: self.kind,
            id: self.id,
            attributes: Some(attributes),
            relationships: self.relationships,
        }
    }

    /// Add a relationship under `name`.
    pub fn relationship(mut self, name: impl Into<String>, relationship: Relationship) -> Self {
        self.relationships.insert(name.into(), relationship);
        self
    }

    /// Add a to-one relationship built from a bare id.
    pub fn to_one(self, name: impl Into<String>, kind: &'static str, id: impl Into<Id>) -> Self {
        self.relationship(name, Relationship::to_one(kind, id))
    }

    /// Add a to-one relationship only when `id` is present.
    pub fn to_one_opt(
        self,
        name: impl Into<String>,
        kind: &'static str,
        id: Option<impl Into<Id>>,
    ) -> Self {
        match id {
            Some(id) => self.to_one(name, kind, id),
            None => self,
        }
    }

    /// Finish the document.
    pub fn build(self) -> Document<Resource<A>> {
        Document::new(Resource {
            id: self.id,
            kind: self.kind.to_string(),
            attributes: self.attributes,
            relationships: (!self.relationships.is_empty()).then_some(self.relationships),
            links: None,
            meta: None,
        })
    }
}
