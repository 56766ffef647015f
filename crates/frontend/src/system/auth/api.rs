use contracts::system::auth::{AdminSession, LoginRequest};
use view_model::SyncError;

use crate::shared::api_utils::{get_json, request_json, HttpMethod};

/// Login with email and password
pub async fn login(email: String, password: String) -> Result<AdminSession, SyncError> {
    let request = LoginRequest { email, password };
    request_json(HttpMethod::Post, "/admin/login", Some(&request), None).await
}

/// Profile of the token owner; used to validate a stored session
pub async fn get_profile(token: &str) -> Result<AdminSession, SyncError> {
    get_json("/admin/profile", Some(token)).await
}
