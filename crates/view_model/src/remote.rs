//! Граница с удалённым сервисом: трейт адаптера, токен и таксономия ошибок.

use async_trait::async_trait;
use contracts::enums::ClosedStatus;
use contracts::shared::api::{ApiMessage, ListPage, ListQuery};
use thiserror::Error;

use crate::entity::ListEntity;

/// Machine-distinguishable error kind, used for retry UI and assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Auth,
    Network,
    Server,
    Validation,
    NotFound,
}

/// Ошибка синхронизации с удалённым сервисом
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    /// Missing, invalid or expired token. Never retried automatically.
    #[error("Authentication required: {0}")]
    Auth(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("{message}")]
    Server { status: u16, message: String },
    /// Rejected input, either by the server or before any request was made.
    #[error("{0}")]
    Validation(String),
    #[error("Not found: {0}")]
    NotFound(String),
}

impl SyncError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SyncError::Auth(_) => ErrorKind::Auth,
            SyncError::Network(_) => ErrorKind::Network,
            SyncError::Server { .. } => ErrorKind::Server,
            SyncError::Validation(_) => ErrorKind::Validation,
            SyncError::NotFound(_) => ErrorKind::NotFound,
        }
    }

    /// Whether retrying with the same input may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self.kind(), ErrorKind::Network | ErrorKind::Server)
    }

    pub fn user_message(&self) -> String {
        self.to_string()
    }

    /// Maps a non-2xx response. The body's `message` field, when present,
    /// becomes the human-readable text.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ApiMessage>(body)
            .ok()
            .and_then(|m| m.message)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| format!("Request failed with status {}", status));
        match status {
            401 | 403 => SyncError::Auth(message),
            404 => SyncError::NotFound(message),
            400 | 409 | 422 => SyncError::Validation(message),
            _ => SyncError::Server { status, message },
        }
    }
}

/// Поставщик токена (внешний Auth-коллаборатор).
///
/// Контроллер только читает токен; обновление и хранение не его забота.
pub trait TokenProvider {
    fn current_token(&self) -> Option<String>;

    fn is_authenticated(&self) -> bool {
        self.current_token().is_some()
    }
}

/// Fixed token, e.g. for tests or a session captured once.
#[derive(Debug, Clone, Default)]
pub struct StaticToken(pub Option<String>);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Some(token.into()))
    }

    pub fn none() -> Self {
        Self(None)
    }
}

impl TokenProvider for StaticToken {
    fn current_token(&self) -> Option<String> {
        self.0.clone().filter(|t| !t.is_empty())
    }
}

/// Адаптер удалённого источника для одного вида записей.
///
/// Каждая успешная операция возвращает каноническую запись или коллекцию,
/// которая заменяет локальное состояние.
#[async_trait(?Send)]
pub trait RemoteSource {
    type Record: ListEntity;
    type Status: ClosedStatus;
    type CreateInput;
    type UpdateInput;

    async fn load_all(&self, token: &str, query: &ListQuery) -> Result<ListPage<Self::Record>, SyncError>;

    async fn create(&self, token: &str, input: Self::CreateInput) -> Result<Self::Record, SyncError>;

    async fn update_fields(&self, token: &str, id: &str, patch: Self::UpdateInput) -> Result<Self::Record, SyncError>;

    async fn update_status(&self, token: &str, id: &str, status: Self::Status) -> Result<Self::Record, SyncError>;

    /// A second delete of the same id reports `NotFound`.
    async fn remove(&self, token: &str, id: &str) -> Result<(), SyncError>;
}

/// Parses a status value before any network call.
pub fn parse_status<S: ClosedStatus>(value: &str) -> Result<S, SyncError> {
    value.parse::<S>().map_err(SyncError::Validation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::enums::StoreStatus;

    #[test]
    fn test_status_mapping() {
        assert_eq!(SyncError::from_status(401, "").kind(), ErrorKind::Auth);
        assert_eq!(SyncError::from_status(404, "{}").kind(), ErrorKind::NotFound);
        assert_eq!(SyncError::from_status(409, "").kind(), ErrorKind::Validation);
        assert_eq!(SyncError::from_status(502, "").kind(), ErrorKind::Server);
    }

    #[test]
    fn test_server_message_is_used() {
        let err = SyncError::from_status(400, r#"{"message":"Subdomain already taken"}"#);
        assert_eq!(err, SyncError::Validation("Subdomain already taken".into()));
        assert_eq!(err.user_message(), "Subdomain already taken");
        assert!(!err.is_retryable());

        let err = SyncError::from_status(500, "<html>oops</html>");
        assert_eq!(err.user_message(), "Request failed with status 500");
        assert!(err.is_retryable());
    }

    #[test]
    fn test_parse_status_rejects_out_of_domain() {
        assert_eq!(parse_status::<StoreStatus>("live"), Ok(StoreStatus::Active));
        let err = parse_status::<StoreStatus>("deleted").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_static_token() {
        assert!(StaticToken::new("abc").is_authenticated());
        assert!(!StaticToken::none().is_authenticated());
        assert!(!StaticToken::new("").is_authenticated());
    }
}
