//! Query parameters.
//!
//! [`QueryParams`] keeps its keys sorted so the same set of parameters
//! always produces the same query string, whatever order they were added
//! in. List values are joined with `,` (e.g. `include=image,plan`).

use std::collections::BTreeMap;

use serde::Serialize;

use crate::pagination::PageParams;

/// A single query parameter value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum QueryValue {
    One(String),
    Many(Vec<String>),
}

impl QueryValue {
    fn encode(&self) -> String {
        match self {
            QueryValue::One(value) => value.clone(),
            QueryValue::Many(values) => values.join(","),
        }
    }
}

/// Query parameters for a request (filtering, pagination, inclusion).
///
/// # Example
///
/// ```
/// use cycleapi::QueryParams;
///
/// let query = QueryParams::new()
///     .filter("state", "running")
///     .include(["image", "plan"]);
///
/// assert_eq!(
///     query.to_query_string(),
///     "filter%5Bstate%5D=running&include=image%2Cplan"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueryParams(BTreeMap<String, QueryValue>);

impl QueryParams {
    /// Empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a single-valued parameter, replacing any previous value.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), QueryValue::One(value.into()));
        self
    }

    /// Set a list-valued parameter. An empty list removes the parameter.
    pub fn set_list<I>(mut self, key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let key = key.into();
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            self.0.remove(&key);
        } else {
            self.0.insert(key, QueryValue::Many(values));
        }
        self
    }

    /// `filter[name]=value`
    pub fn filter(self, name: &str, value: impl Into<String>) -> Self {
        self.set(format!("filter[{name}]"), value)
    }

    /// `include=a,b`
    pub fn include<I>(self, relationships: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.set_list("include", relationships)
    }

    /// `sort=a,-b`
    pub fn sort<I>(self, fields: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.set_list("sort", fields)
    }

    /// `page[number]=n&page[size]=m`
    pub fn page(self, page: PageParams) -> Self {
        self.set("page[number]", page.number.to_string())
            .set("page[size]", page.size.to_string())
    }

    /// Look up a parameter.
    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parameters as `(key, value)` pairs in canonical (sorted) order.
    pub fn pairs(&self) -> Vec<(&str, String)> {
        self.0
            .iter()
            .map(|(key, value)| (key.as_str(), value.encode()))
            .collect()
    }

    /// Percent-encoded query string in canonical order.
    pub fn to_query_string(&self) -> String {
        self.pairs()
            .iter()
            .map(|(key, value)| {
                format!("{}={}", urlencoding::encode(key), urlencoding::encode(value))
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order_does_not_matter() {
        let a = QueryParams::new().set("b", "2").filter("name", "x").set("a", "1");
        let b = QueryParams::new().set("a", "1").set("b", "2").filter("name", "x");

        assert_eq!(a, b);
        assert_eq!(a.to_query_string(), b.to_query_string());
        assert_eq!(a.pairs()[0], ("a", "1".to_string()));
    }

    #[test]
    fn test_page_params() {
        let query = QueryParams::new().page(PageParams::new(3, 25));
        assert_eq!(
            query.pairs(),
            vec![("page[number]", "3".to_string()), ("page[size]", "25".to_string())]
        );
    }

    #[test]
    fn test_empty_list_removes_parameter() {
        let query = QueryParams::new()
            .include(["image"])
            .include(Vec::<String>::new());
        assert!(query.is_empty());
        assert_eq!(query.to_query_string(), "");
    }
}
