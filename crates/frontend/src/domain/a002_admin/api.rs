use async_trait::async_trait;
use contracts::domain::a002_admin::{Admin, AdminEnvelope, AdminListResponse, CreateAdminDto, UpdateAdminDto};
use contracts::enums::AdminStatus;
use contracts::shared::api::{ApiMessage, ListPage, ListQuery, StatusChange};
use view_model::{RemoteSource, SyncError};

use crate::shared::api_utils::{get_json, request_json, segment, with_query, HttpMethod};

/// Адаптер `/admins`
#[derive(Debug, Clone, Copy, Default)]
pub struct AdminApi;

#[async_trait(?Send)]
impl RemoteSource for AdminApi {
    type Record = Admin;
    type Status = AdminStatus;
    type CreateInput = CreateAdminDto;
    type UpdateInput = UpdateAdminDto;

    async fn load_all(&self, token: &str, query: &ListQuery) -> Result<ListPage<Admin>, SyncError> {
        let response: AdminListResponse = get_json(&with_query("/admins", query), Some(token)).await?;
        Ok(response.into())
    }

    async fn create(&self, token: &str, input: CreateAdminDto) -> Result<Admin, SyncError> {
        input.validate().map_err(SyncError::Validation)?;
        let envelope: AdminEnvelope =
            request_json(HttpMethod::Post, "/admins", Some(&input), Some(token)).await?;
        Ok(envelope.admin)
    }

    async fn update_fields(&self, token: &str, id: &str, patch: UpdateAdminDto) -> Result<Admin, SyncError> {
        let path = format!("/admins/{}", segment(id));
        let envelope: AdminEnvelope =
            request_json(HttpMethod::Put, &path, Some(&patch), Some(token)).await?;
        Ok(envelope.admin)
    }

    async fn update_status(&self, token: &str, id: &str, status: AdminStatus) -> Result<Admin, SyncError> {
        let path = format!("/admins/{}/status", segment(id));
        let envelope: AdminEnvelope =
            request_json(HttpMethod::Put, &path, Some(&StatusChange { status }), Some(token)).await?;
        Ok(envelope.admin)
    }

    async fn remove(&self, token: &str, id: &str) -> Result<(), SyncError> {
        let path = format!("/admins/{}", segment(id));
        let _: ApiMessage = request_json::<(), _>(HttpMethod::Delete, &path, None, Some(token)).await?;
        Ok(())
    }
}
