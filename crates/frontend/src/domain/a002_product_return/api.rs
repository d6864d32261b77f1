use crate::shared::error::ApiError;
use crate::shared::http;
use contracts::domain::a002_product_return::aggregate::{
    ChangeReturnStatusRequest, ProductReturn, ProductReturnDto,
};
use contracts::domain::common::AggregateRoot;

pub async fn fetch_all() -> Result<Vec<ProductReturn>, ApiError> {
    http::get_json(&ProductReturn::api_path()).await
}

pub async fn fetch_by_id(id: &str) -> Result<ProductReturn, ApiError> {
    http::get_json(&ProductReturn::item_path(id)).await
}

pub async fn save(dto: &ProductReturnDto) -> Result<(), ApiError> {
    match dto.id.as_deref() {
        Some(id) => http::put(&ProductReturn::item_path(id), dto).await,
        None => http::post(&ProductReturn::api_path(), dto).await,
    }
}

pub async fn delete(id: &str) -> Result<(), ApiError> {
    http::delete(&ProductReturn::item_path(id)).await
}

pub async fn change_status(id: &str, request: &ChangeReturnStatusRequest) -> Result<(), ApiError> {
    http::post(&format!("{}/status", ProductReturn::item_path(id)), request).await
}
