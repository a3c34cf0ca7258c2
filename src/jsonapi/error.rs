//! JSON:API error documents.

use std::fmt;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::skip_serializing_none;

use super::document::{Link, Meta};

/// A document carrying `errors` instead of `data`.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDocument {
    pub errors: Vec<ErrorDetail>,
    pub meta: Option<Meta>,
    pub jsonapi: Option<Value>,
}

/// A single JSON:API error object.
///
/// Several of these may accompany one failed call; `source.pointer` names
/// the offending field (e.g. `/data/attributes/name`).
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub id: Option<String>,
    pub links: Option<ErrorLinks>,
    pub status: Option<String>,
    pub code: Option<String>,
    pub title: Option<String>,
    pub detail: Option<String>,
    pub source: Option<ErrorSource>,
    pub meta: Option<Meta>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorLinks {
    pub about: Option<Link>,
}

/// Where in the request an error originated.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorSource {
    /// JSON pointer into the request document.
    pub pointer: Option<String>,
    /// Query parameter that caused the error.
    pub parameter: Option<String>,
}

impl ErrorDetail {
    /// Build an error for a failed response whose body was not an error document.
    pub(crate) fn from_status(status: StatusCode, body: &str) -> Self {
        let body = body.trim();
        Self {
            status: Some(status.as_u16().to_string()),
            title: Some(
                status
                    .canonical_reason()
                    .unwrap_or("Unknown status")
                    .to_string(),
            ),
            detail: (!body.is_empty()).then(|| body.to_string()),
            ..Default::default()
        }
    }

    /// HTTP status as a number, when the server provided a parseable one.
    pub fn status_code(&self) -> Option<u16> {
        self.status.as_deref()?.parse().ok()
    }

    /// JSON pointer of the offending field, if any.
    pub fn pointer(&self) -> Option<&str> {
        self.source.as_ref()?.pointer.as_deref()
    }
}

impl fmt::Display for ErrorDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = self
            .title
            .as_deref()
            .or(self.code.as_deref())
            .unwrap_or("error");
        write!(f, "{title}")?;
        if let Some(detail) = &self.detail {
            write!(f, ": {detail}")?;
        }
        if let Some(pointer) = self.pointer() {
            write!(f, " [{pointer}]")?;
        }
        Ok(())
    }
}
