use crate::shared::error::ApiError;
use crate::shared::http;
use contracts::domain::a003_production_item::aggregate::{ProductionItem, ProductionItemDto};
use contracts::domain::common::AggregateRoot;

pub async fn fetch_all() -> Result<Vec<ProductionItem>, ApiError> {
    http::get_json(&ProductionItem::api_path()).await
}

pub async fn fetch_by_id(id: &str) -> Result<ProductionItem, ApiError> {
    http::get_json(&ProductionItem::item_path(id)).await
}

pub async fn save(dto: &ProductionItemDto) -> Result<(), ApiError> {
    match dto.id.as_deref() {
        Some(id) => http::put(&ProductionItem::item_path(id), dto).await,
        None => http::post(&ProductionItem::api_path(), dto).await,
    }
}

pub async fn delete(id: &str) -> Result<(), ApiError> {
    http::delete(&ProductionItem::item_path(id)).await
}

/// Passa a peça para a próxima etapa; o backend decide qual é
pub async fn advance(id: &str) -> Result<(), ApiError> {
    http::post(&format!("{}/advance", ProductionItem::item_path(id)), &serde_json::json!({})).await
}
