//! Top-level documents, resources and relationships.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use serde_with::skip_serializing_none;

/// Identifier of a resource on the backend.
pub type Id = String;

/// Free-form `meta` object.
pub type Meta = serde_json::Map<String, Value>;

/// Resource-level `links` object.
pub type Links = BTreeMap<String, Link>;

/// A document whose primary data is a single (possibly missing) resource.
pub type Single<A = Value> = Document<Option<Resource<A>>>;

/// A document whose primary data is a list of resources.
pub type Collection<A = Value> = Document<Vec<Resource<A>>>;

/// A JSON:API top-level document.
///
/// `D` is the shape of the primary data: usually `Option<Resource<A>>`
/// ([`Single`]) or `Vec<Resource<A>>` ([`Collection`]).
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document<D> {
    /// Primary data.
    pub data: D,

    /// Related resources sideloaded with the primary data.
    pub included: Option<Vec<Resource>>,

    /// Top-level links, including pagination links.
    pub links: Option<TopLinks>,

    /// Non-standard meta information.
    pub meta: Option<Meta>,

    /// Information about the server's implementation.
    pub jsonapi: Option<Value>,
}

impl<D> Document<D> {
    /// Wrap primary data in an otherwise empty document.
    pub fn new(data: D) -> Self {
        Self {
            data,
            included: None,
            links: None,
            meta: None,
            jsonapi: None,
        }
    }

    /// The `next` pagination link, if the server sent one.
    pub fn next_link(&self) -> Option<&str> {
        self.links
            .as_ref()
            .and_then(|l| l.next.as_ref())
            .and_then(Link::href)
    }

    /// Find a sideloaded resource by type and id.
    pub fn find_included(&self, kind: &str, id: &str) -> Option<&Resource> {
        self.included
            .as_deref()?
            .iter()
            .find(|r| r.kind == kind && r.id.as_deref() == Some(id))
    }
}

/// A resource object.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource<A = Value> {
    /// Server-assigned identifier; absent on creation requests.
    pub id: Option<Id>,

    /// Resource type, fixed per resource kind.
    #[serde(rename = "type")]
    pub kind: String,

    /// Resource attributes.
    pub attributes: Option<A>,

    /// Relationships to other resources, keyed by name.
    pub relationships: Option<BTreeMap<String, Relationship>>,

    /// Resource links.
    pub links: Option<Links>,

    /// Resource meta.
    pub meta: Option<Meta>,
}

impl<A> Resource<A> {
    /// Look up a named relationship.
    pub fn relationship(&self, name: &str) -> Option<&Relationship> {
        self.relationships.as_ref()?.get(name)
    }

    /// The id of a to-one relationship, if it is set.
    pub fn related_id(&self, name: &str) -> Option<&str> {
        match self.relationship(name)?.data.as_ref()? {
            RelationshipData::ToOne(Some(identifier)) => Some(identifier.id.as_str()),
            _ => None,
        }
    }
}

/// A `{ type, id }` pair identifying a resource.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceIdentifier {
    /// Resource identifier.
    pub id: Id,

    /// Resource type.
    #[serde(rename = "type")]
    pub kind: String,

    /// Identifier meta.
    pub meta: Option<Meta>,
}

impl ResourceIdentifier {
    /// Create an identifier for a resource of the given type.
    pub fn new(kind: &'static str, id: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            kind: kind.to_string(),
            meta: None,
        }
    }
}

/// A relationship object.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    /// Resource linkage. `None` means the key was absent; an explicit
    /// `null` is kept as `Some(RelationshipData::ToOne(None))`.
    #[serde(default, deserialize_with = "present")]
    pub data: Option<RelationshipData>,

    /// Relationship links.
    pub links: Option<RelationshipLinks>,

    /// Relationship meta.
    pub meta: Option<Meta>,
}

impl Relationship {
    /// A to-one relationship pointing at `kind`/`id`.
    pub fn to_one(kind: &'static str, id: impl Into<Id>) -> Self {
        Self::with_data(RelationshipData::ToOne(Some(ResourceIdentifier::new(kind, id))))
    }

    /// A to-many relationship pointing at every id in `ids`.
    pub fn to_many<I>(kind: &'static str, ids: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Id>,
    {
        Self::with_data(RelationshipData::ToMany(
            ids.into_iter()
                .map(|id| ResourceIdentifier::new(kind, id))
                .collect(),
        ))
    }

    /// An explicitly empty to-one relationship (`data: null`).
    pub fn empty() -> Self {
        Self::with_data(RelationshipData::ToOne(None))
    }

    fn with_data(data: RelationshipData) -> Self {
        Self {
            data: Some(data),
            links: None,
            meta: None,
        }
    }
}

/// Resource linkage of a relationship.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RelationshipData {
    /// `data: [identifier, ...]`
    ToMany(Vec<ResourceIdentifier>),
    /// `data: identifier | null`
    ToOne(Option<ResourceIdentifier>),
}

fn present<'de, D>(deserializer: D) -> Result<Option<RelationshipData>, D::Error>
where
    D: Deserializer<'de>,
{
    RelationshipData::deserialize(deserializer).map(Some)
}

/// Links of a relationship object.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipLinks {
    #[serde(rename = "self")]
    pub self_link: Option<Link>,
    pub related: Option<Link>,
}

/// Top-level links, including pagination.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopLinks {
    #[serde(rename = "self")]
    pub self_link: Option<Link>,
    pub related: Option<Link>,
    pub first: Option<Link>,
    pub last: Option<Link>,
    pub prev: Option<Link>,
    pub next: Option<Link>,
}

/// A link: either a bare URL or a link object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Link {
    Href(String),
    Object(LinkObject),
}

impl Link {
    /// The target URL, if any.
    pub fn href(&self) -> Option<&str> {
        match self {
            Link::Href(href) => Some(href.as_str()),
            Link::Object(object) => object.href.as_deref(),
        }
    }
}

/// A link object: `{ href?, meta? }`.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkObject {
    pub href: Option<String>,
    pub meta: Option<Meta>,
}
