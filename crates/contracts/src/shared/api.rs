use serde::{Deserialize, Serialize};

/// Тело ответа с сообщением (ошибки и подтверждения операций)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub message: Option<String>,
}

/// Параметры запроса страницы списка
///
/// Пустой поиск и статус `all` не передаются серверу.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    /// 1-based
    pub page: u32,
    pub limit: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

pub const ALL_SENTINEL: &str = "all";

impl ListQuery {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
            search: None,
            status: None,
        }
    }

    pub fn with_search(mut self, search: &str) -> Self {
        let trimmed = search.trim();
        self.search = (!trimmed.is_empty()).then(|| trimmed.to_string());
        self
    }

    pub fn with_status(mut self, status: &str) -> Self {
        let trimmed = status.trim();
        self.status =
            (!trimmed.is_empty() && trimmed != ALL_SENTINEL).then(|| trimmed.to_string());
        self
    }
}

/// Тело `PUT /{collection}/{id}/status`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChange<S> {
    pub status: S,
}

/// Страница списка в нейтральном виде
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListPage<T> {
    pub records: Vec<T>,
    pub page: u32,
    pub total_pages: u32,
    pub total: u64,
}

impl<T> ListPage<T> {
    /// Single page holding the whole collection.
    pub fn single(records: Vec<T>) -> Self {
        let total = records.len() as u64;
        Self {
            records,
            page: 1,
            total_pages: 1,
            total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_omits_all_and_blank() {
        let q = ListQuery::new(0, 10).with_search("   ").with_status("all");
        assert_eq!(q.page, 1);
        assert_eq!(q.search, None);
        assert_eq!(q.status, None);

        let q = ListQuery::new(2, 10).with_search(" ewa ").with_status("pending");
        assert_eq!(q.search.as_deref(), Some("ewa"));
        assert_eq!(q.status.as_deref(), Some("pending"));
    }
}
