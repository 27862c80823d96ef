//! Wire types shared by every API call.

use serde::{Deserialize, Serialize};

/// Pagination metadata returned alongside every collection page.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PageMeta {
    pub current_page: u32,
    pub last_page: u32,
    pub total: u64,
}

impl Default for PageMeta {
    fn default() -> Self {
        Self {
            current_page: 1,
            last_page: 1,
            total: 0,
        }
    }
}

/// One page of a server collection.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: PageMeta,
}

impl<T> Page<T> {
    /// An empty first page, used when resetting cached state.
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            pagination: PageMeta::default(),
        }
    }
}

/// Acknowledgement body returned by every mutation endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiMessage {
    pub message: String,
}

/// Body for status-transition endpoints (`POST {resource}/{id}/status`).
///
/// `reason` is only present for transitions that demand one (leave rejection).
#[derive(Debug, Clone, Serialize)]
pub struct StatusChange {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl StatusChange {
    pub fn to(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            reason: None,
        }
    }

    pub fn with_reason(status: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            reason: Some(reason.into()),
        }
    }
}

/// Query parameters for a list fetch.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub page: u32,
    pub search: Option<String>,
    pub filters: Vec<(String, String)>,
}

impl ListQuery {
    /// Query for a specific page with no filters.
    pub fn page(page: u32) -> Self {
        Self {
            page: page.max(1),
            ..Default::default()
        }
    }

    /// Attach a search term; blank terms are dropped.
    pub fn search(mut self, term: &str) -> Self {
        let term = term.trim();
        if !term.is_empty() {
            self.search = Some(term.to_string());
        }
        self
    }

    /// Attach an arbitrary filter pair.
    pub fn filter(mut self, key: &str, value: impl ToString) -> Self {
        self.filters.push((key.to_string(), value.to_string()));
        self
    }

    /// Flatten into URL query pairs.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![("page".to_string(), self.page.max(1).to_string())];
        if let Some(search) = &self.search {
            pairs.push(("search".to_string(), search.clone()));
        }
        pairs.extend(self.filters.iter().cloned());
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_query_defaults_to_page_one() {
        let pairs = ListQuery::default().to_pairs();
        assert_eq!(pairs, vec![("page".to_string(), "1".to_string())]);
    }

    #[test]
    fn test_list_query_blank_search_dropped() {
        let query = ListQuery::page(2).search("   ");
        assert!(query.search.is_none());
        assert_eq!(query.to_pairs().len(), 1);
    }

    #[test]
    fn test_list_query_full_pairs() {
        let pairs = ListQuery::page(3)
            .search("ahmed")
            .filter("department_id", 7)
            .to_pairs();

        assert_eq!(pairs[0], ("page".to_string(), "3".to_string()));
        assert_eq!(pairs[1], ("search".to_string(), "ahmed".to_string()));
        assert_eq!(pairs[2], ("department_id".to_string(), "7".to_string()));
    }

    #[test]
    fn test_page_envelope_decodes() {
        let json = r#"{
            "items": [{"id": 1}, {"id": 2}],
            "pagination": {"current_page": 1, "last_page": 5, "total": 93}
        }"#;

        #[derive(Deserialize)]
        struct Row {
            id: i64,
        }

        let page: Page<Row> = serde_json::from_str(json).unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[1].id, 2);
        assert_eq!(page.pagination.last_page, 5);
        assert_eq!(page.pagination.total, 93);
    }

    #[test]
    fn test_status_change_reason_serialization() {
        let plain = serde_json::to_string(&StatusChange::to("approved")).unwrap();
        assert_eq!(plain, r#"{"status":"approved"}"#);

        let with_reason = serde_json::to_string(&StatusChange::with_reason("rejected", "no cover available")).unwrap();
        assert_eq!(with_reason, r#"{"status":"rejected","reason":"no cover available"}"#);
    }
}
