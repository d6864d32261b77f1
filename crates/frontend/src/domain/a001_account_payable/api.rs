use crate::shared::error::ApiError;
use crate::shared::http;
use contracts::domain::a001_account_payable::aggregate::{
    AccountPayable, AccountPayableDto, PayRequest,
};
use contracts::domain::common::AggregateRoot;

pub async fn fetch_all() -> Result<Vec<AccountPayable>, ApiError> {
    http::get_json(&AccountPayable::api_path()).await
}

pub async fn fetch_by_id(id: &str) -> Result<AccountPayable, ApiError> {
    http::get_json(&AccountPayable::item_path(id)).await
}

/// POST sem id, PUT com id
pub async fn save(dto: &AccountPayableDto) -> Result<(), ApiError> {
    match dto.id.as_deref() {
        Some(id) => http::put(&AccountPayable::item_path(id), dto).await,
        None => http::post(&AccountPayable::api_path(), dto).await,
    }
}

pub async fn delete(id: &str) -> Result<(), ApiError> {
    http::delete(&AccountPayable::item_path(id)).await
}

pub async fn mark_paid(id: &str, request: &PayRequest) -> Result<(), ApiError> {
    http::post(&format!("{}/pay", AccountPayable::item_path(id)), request).await
}
