//! Structures shared by several resource kinds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct State<S> {
    /// Current state.
    pub current: S,

    /// When the state last changed.
    #[serde(default)]
    pub changed: Option<DateTime<Utc>>,

    /// Last error recorded against the resource.
    #[serde(default)]
    pub error: Option<StateError>,
}

/// Error attached to a resource's state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateError {
    pub message: String,
    #[serde(default)]
    pub time: Option<DateTime<Utc>>,
}

/// Lifecycle timestamps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Events {
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub deleted: Option<DateTime<Utc>>,
}

/// Owner of a resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scope {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
}
