use crate::shared::error::ApiError;
use crate::shared::http;
use contracts::domain::a004_marketing_task::aggregate::{MarketingTask, MarketingTaskDto};
use contracts::domain::a004_marketing_task::board::TaskPositionUpdate;
use contracts::domain::common::AggregateRoot;

pub async fn fetch_all() -> Result<Vec<MarketingTask>, ApiError> {
    http::get_json(&MarketingTask::api_path()).await
}

pub async fn fetch_by_id(id: &str) -> Result<MarketingTask, ApiError> {
    http::get_json(&MarketingTask::item_path(id)).await
}

pub async fn save(dto: &MarketingTaskDto) -> Result<(), ApiError> {
    match dto.id.as_deref() {
        Some(id) => http::put(&MarketingTask::item_path(id), dto).await,
        None => http::post(&MarketingTask::api_path(), dto).await,
    }
}

pub async fn delete(id: &str) -> Result<(), ApiError> {
    http::delete(&MarketingTask::item_path(id)).await
}

/// Grava de uma vez as novas posições dos cartões mexidos
pub async fn save_positions(updates: &[TaskPositionUpdate]) -> Result<(), ApiError> {
    http::put(&format!("{}/positions", MarketingTask::api_path()), &updates).await
}
