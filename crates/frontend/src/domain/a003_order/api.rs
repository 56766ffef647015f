use async_trait::async_trait;
use contracts::domain::a003_order::{Order, OrderEnvelope, OrderListResponse, UpdateOrderDto};
use contracts::enums::OrderStatus;
use contracts::shared::api::{ApiMessage, ListPage, ListQuery, StatusChange};
use view_model::{RemoteSource, SyncError};

use crate::shared::api_utils::{get_json, request_json, segment, with_query, HttpMethod};

/// Адаптер `/orders`
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderApi;

#[async_trait(?Send)]
impl RemoteSource for OrderApi {
    type Record = Order;
    type Status = OrderStatus;
    type CreateInput = Order;
    type UpdateInput = UpdateOrderDto;

    async fn load_all(&self, token: &str, query: &ListQuery) -> Result<ListPage<Order>, SyncError> {
        let response: OrderListResponse = get_json(&with_query("/orders", query), Some(token)).await?;
        Ok(response.into())
    }

    async fn create(&self, token: &str, input: Order) -> Result<Order, SyncError> {
        if input.customer_name.trim().is_empty() {
            return Err(SyncError::Validation("Customer name is required".into()));
        }
        let envelope: OrderEnvelope =
            request_json(HttpMethod::Post, "/orders", Some(&input), Some(token)).await?;
        Ok(envelope.order)
    }

    async fn update_fields(&self, token: &str, id: &str, patch: UpdateOrderDto) -> Result<Order, SyncError> {
        let path = format!("/orders/{}", segment(id));
        let envelope: OrderEnvelope =
            request_json(HttpMethod::Put, &path, Some(&patch), Some(token)).await?;
        Ok(envelope.order)
    }

    async fn update_status(&self, token: &str, id: &str, status: OrderStatus) -> Result<Order, SyncError> {
        let path = format!("/orders/{}/status", segment(id));
        let envelope: OrderEnvelope =
            request_json(HttpMethod::Put, &path, Some(&StatusChange { status }), Some(token)).await?;
        Ok(envelope.order)
    }

    async fn remove(&self, token: &str, id: &str) -> Result<(), SyncError> {
        let path = format!("/orders/{}", segment(id));
        let _: ApiMessage = request_json::<(), _>(HttpMethod::Delete, &path, None, Some(token)).await?;
        Ok(())
    }
}
