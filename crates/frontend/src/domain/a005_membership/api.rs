use crate::shared::error::ApiError;
use crate::shared::http;
use contracts::domain::a005_membership::aggregate::{Membership, MembershipDto};
use contracts::domain::common::AggregateRoot;

pub async fn fetch_all() -> Result<Vec<Membership>, ApiError> {
    http::get_json(&Membership::api_path()).await
}

pub async fn fetch_by_id(id: &str) -> Result<Membership, ApiError> {
    http::get_json(&Membership::item_path(id)).await
}

pub async fn save(dto: &MembershipDto) -> Result<(), ApiError> {
    match dto.id.as_deref() {
        Some(id) => http::put(&Membership::item_path(id), dto).await,
        None => http::post(&Membership::api_path(), dto).await,
    }
}

pub async fn delete(id: &str) -> Result<(), ApiError> {
    http::delete(&Membership::item_path(id)).await
}
