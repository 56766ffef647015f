use async_trait::async_trait;
use contracts::domain::a001_store::{
    CreateStoreDto, ResetPasswordDto, ResetPasswordResponse, Store, StoreEnvelope,
    StoreListResponse, UpdateStoreDto,
};
use contracts::enums::StoreStatus;
use contracts::shared::api::{ApiMessage, ListPage, ListQuery, StatusChange};
use view_model::{RemoteSource, SyncError};

use crate::shared::api_utils::{get_json, request_json, segment, with_query, HttpMethod};

/// Адаптер `/stores`
#[derive(Debug, Clone, Copy, Default)]
pub struct StoreApi;

#[async_trait(?Send)]
impl RemoteSource for StoreApi {
    type Record = Store;
    type Status = StoreStatus;
    type CreateInput = CreateStoreDto;
    type UpdateInput = UpdateStoreDto;

    async fn load_all(&self, token: &str, query: &ListQuery) -> Result<ListPage<Store>, SyncError> {
        let response: StoreListResponse = get_json(&with_query("/stores", query), Some(token)).await?;
        Ok(response.into())
    }

    async fn create(&self, token: &str, input: CreateStoreDto) -> Result<Store, SyncError> {
        input.validate().map_err(SyncError::Validation)?;
        let envelope: StoreEnvelope =
            request_json(HttpMethod::Post, "/stores", Some(&input), Some(token)).await?;
        Ok(envelope.store)
    }

    async fn update_fields(&self, token: &str, id: &str, patch: UpdateStoreDto) -> Result<Store, SyncError> {
        let path = format!("/stores/{}", segment(id));
        let envelope: StoreEnvelope =
            request_json(HttpMethod::Put, &path, Some(&patch), Some(token)).await?;
        Ok(envelope.store)
    }

    async fn update_status(&self, token: &str, id: &str, status: StoreStatus) -> Result<Store, SyncError> {
        let path = format!("/stores/{}/status", segment(id));
        let body = StatusChange { status };
        let envelope: StoreEnvelope =
            request_json(HttpMethod::Put, &path, Some(&body), Some(token)).await?;
        Ok(envelope.store)
    }

    async fn remove(&self, token: &str, id: &str) -> Result<(), SyncError> {
        let path = format!("/stores/{}", segment(id));
        let _: ApiMessage = request_json::<(), _>(HttpMethod::Delete, &path, None, Some(token)).await?;
        Ok(())
    }
}

/// Generates a new password for the store admin
pub async fn reset_admin_password(
    token: &str,
    store_id: &str,
    admin_email: String,
) -> Result<ResetPasswordResponse, SyncError> {
    let path = format!("/stores/{}/reset-password", segment(store_id));
    let body = ResetPasswordDto { admin_email };
    request_json(HttpMethod::Post, &path, Some(&body), Some(token)).await
}
