//! Pagination utilities for JSON:API collections.

use serde::{Deserialize, Serialize};

use crate::jsonapi::{Document, TopLinks};

/// `page[size]` used when the caller does not pick one.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// A page of results from a collection endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(bound = "T: Serialize")]
pub struct Page<T> {
    /// Primary data of the page.
    pub items: Vec<T>,
    /// `page[number]` that was requested.
    pub number: u32,
    /// Requested page size.
    pub size: u32,
    /// Whether another page should be requested.
    pub has_more: bool,
    /// Pagination links sent by the server.
    pub links: Option<TopLinks>,
}

impl<T> Page<T> {
    /// Create a page from items and pagination info.
    ///
    /// When the server sent links, the presence of `next` decides
    /// `has_more`; otherwise a full page is taken to mean more may follow.
    #[must_use]
    pub fn new(items: Vec<T>, params: PageParams, links: Option<TopLinks>) -> Self {
        let has_more = match &links {
            Some(l) if l.first.is_some() || l.last.is_some() || l.next.is_some() => {
                l.next.is_some()
            }
            _ => items.len() >= params.size as usize,
        };
        Self {
            items,
            number: params.number,
            size: params.size,
            has_more,
            links,
        }
    }

    /// Build a page from a collection document.
    #[must_use]
    pub fn from_document(document: Document<Vec<T>>, params: PageParams) -> Self {
        Self::new(document.data, params, document.links)
    }

    /// Convert every item, keeping the paging metadata.
    #[must_use]
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            number: self.number,
            size: self.size,
            has_more: self.has_more,
            links: self.links,
        }
    }

    /// Whether the server returned no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Item count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// `page[number]` / `page[size]` parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageParams {
    /// 1-based.
    pub number: u32,
    /// Items per page.
    pub size: u32,
}

impl PageParams {
    #[must_use]
    pub fn new(number: u32, size: u32) -> Self {
        Self { number, size }
    }

    /// The following page with the same size.
    #[must_use]
    pub fn next(self) -> Self {
        Self {
            number: self.number + 1,
            size: self.size,
        }
    }
}

impl Default for PageParams {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }
}
