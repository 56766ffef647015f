use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Сессия администратора, возвращаемая `/admin/login` и `/admin/profile`
///
/// `/admin/profile` не возвращает токен, поэтому поле необязательно на входе.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminSession {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub store_name: String,
    #[serde(default)]
    pub store_id: Option<String>,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default)]
    pub token: String,
}

impl AdminSession {
    pub fn is_super_admin(&self) -> bool {
        self.store_id.is_none() || self.permissions.iter().any(|p| p == "all")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_without_token() {
        let json = r#"{"_id":"a1","name":"Sarah Johnson","email":"sarah@company.com","storeId":null,"permissions":["all"]}"#;
        let session: AdminSession = serde_json::from_str(json).unwrap();
        assert_eq!(session.id, "a1");
        assert!(session.token.is_empty());
        assert!(session.is_super_admin());
    }
}
