use crate::shared::error::ApiError;
use crate::shared::http::{self, BatchOutcome};
use contracts::domain::a006_order::aggregate::{Order, OrderDto};
use contracts::domain::a006_order::calculation::{CalculationRequest, CalculationResponse};
use contracts::domain::common::AggregateRoot;

pub async fn fetch_all() -> Result<Vec<Order>, ApiError> {
    http::get_json(&Order::api_path()).await
}

pub async fn fetch_by_id(id: &str) -> Result<Order, ApiError> {
    http::get_json(&Order::item_path(id)).await
}

/// Devolve o pedido gravado: o número e o id vêm do backend
pub async fn save(dto: &OrderDto) -> Result<Order, ApiError> {
    match dto.id.as_deref() {
        Some(id) => http::put_json(&Order::item_path(id), dto).await,
        None => http::post_json(&Order::api_path(), dto).await,
    }
}

/// Exclusão em lote: uma chamada por id, todas juntas, sem desfazer
pub async fn delete_many(ids: Vec<String>) -> BatchOutcome {
    http::delete_many(&Order::api_path(), ids).await
}

pub async fn calcular(request: &CalculationRequest) -> Result<CalculationResponse, ApiError> {
    http::post_json(&format!("{}/calcular", Order::api_path()), request).await
}

/// Orçamento aprovado vira pedido
pub async fn approve(id: &str) -> Result<Order, ApiError> {
    http::post_json(&format!("{}/approve", Order::item_path(id)), &serde_json::json!({})).await
}
