//! Task envelopes.
//!
//! Every state change on a resource (start, stop, build, reimage,
//! make_primary, ...) is requested by POSTing a [`Task`] to the resource's
//! `tasks` sub-endpoint. New actions need no new transport shape: a
//! resource module only names the action and its parameters.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::skip_serializing_none;

use crate::jsonapi::Single;

/// Response to a task submission: the created task resource.
pub type TaskDocument = Single<Value>;

/// An action name accepted by a resource's `tasks` endpoint.
pub trait TaskAction {
    /// The literal sent as the task's `type`.
    fn as_str(&self) -> &'static str;
}

impl TaskAction for &'static str {
    fn as_str(&self) -> &'static str {
        *self
    }
}

/// An action request body: `{ "type": action, "attributes": contents }`.
///
/// Created, sent once and discarded; it is never stored as a resource.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task<A = Value> {
    /// Action name.
    #[serde(rename = "type")]
    pub action: String,

    /// Action parameters.
    pub attributes: Option<A>,
}

impl Task {
    /// A task with no parameters.
    pub fn new(action: impl TaskAction) -> Self {
        Self {
            action: action.as_str().to_string(),
            attributes: None,
        }
    }
}

impl<A> Task<A> {
    /// A task carrying parameters.
    pub fn with_contents(action: impl TaskAction, contents: A) -> Self {
        Self {
            action: action.as_str().to_string(),
            attributes: Some(contents),
        }
    }
}

/// Build a task from an action and optional parameters.
pub fn make_task<A>(action: impl TaskAction, contents: Option<A>) -> Task<A> {
    Task {
        action: action.as_str().to_string(),
        attributes: contents,
    }
}
