use serde::{Deserialize, Serialize};

/// Default page size used by list screens.
pub const DEFAULT_PAGE_LIMIT: u32 = 20;

/// One page of a cursor-paginated list.
///
/// `cursor` is opaque; pass it back verbatim to fetch the next page. Its
/// absence means the list is exhausted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default)]
    pub cursor: Option<String>,
    pub count: u64,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    /// Translates every item, keeping `cursor` and `count`.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            cursor: self.cursor,
            count: self.count,
            results: self.results.into_iter().map(f).collect(),
        }
    }

    /// Whether there is no further page.
    pub fn is_last(&self) -> bool {
        self.cursor.is_none()
    }
}

/// What page to ask a list endpoint for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: u32,
    pub cursor: Option<String>,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first(DEFAULT_PAGE_LIMIT)
    }
}

impl PageRequest {
    /// The first page of `limit` items.
    pub fn first(limit: u32) -> Self {
        Self {
            limit,
            cursor: None,
        }
    }

    /// The request for the page after `page`, or `None` at the end of the list.
    pub fn next<T>(&self, page: &Page<T>) -> Option<Self> {
        page.cursor.as_ref().map(|cursor| Self {
            limit: self.limit,
            cursor: Some(cursor.clone()),
        })
    }

    pub(crate) fn params(&self) -> [(&'static str, Option<String>); 2] {
        [
            ("limit", Some(self.limit.to_string())),
            ("cursor", self.cursor.clone()),
        ]
    }
}
