use super::{CountResponse, MessageResponse};
use crate::core::lease::{compute_remaining, escalated_rent, RemainingTerm};
use crate::core::renewals::Renewal;
use crate::domain::model::{Tenant, TenantInput};
use crate::domain::ports::{Clock, Storage};
use crate::http::error::{ApiError, ApiResult};
use crate::http::state::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenewalQuery {
    pub within_days: Option<i64>,
}

/// Tenant with the figures derived for `today`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantDetail {
    #[serde(flatten)]
    pub tenant: Tenant,
    pub current_rent: f64,
    pub time_remaining: RemainingTerm,
}

pub async fn list_tenants<S: Storage + 'static, C: Clock + 'static>(
    State(state): State<AppState<S, C>>,
) -> ApiResult<Json<Vec<Tenant>>> {
    Ok(Json(state.ledger.list_tenants().await?))
}

pub async fn count_tenants<S: Storage + 'static, C: Clock + 'static>(
    State(state): State<AppState<S, C>>,
) -> ApiResult<Json<CountResponse>> {
    let total = state.ledger.count_active_tenants().await?;
    Ok(Json(CountResponse { total }))
}

pub async fn renewals<S: Storage + 'static, C: Clock + 'static>(
    State(state): State<AppState<S, C>>,
    query: Result<Query<RenewalQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Renewal>>> {
    let Query(query) = query?;
    if query.within_days.is_some_and(|days| days < 1) {
        return Err(ApiError::BadRequest(
            "withinDays must be at least 1".to_string(),
        ));
    }

    Ok(Json(state.ledger.renewals(query.within_days).await?))
}

pub async fn get_tenant<S: Storage + 'static, C: Clock + 'static>(
    State(state): State<AppState<S, C>>,
    Path(id): Path<String>,
) -> ApiResult<Json<TenantDetail>> {
    let tenant = state.ledger.get_tenant(&id).await?;
    let today = state.ledger.today();

    let current_rent = escalated_rent(
        tenant.amount,
        tenant.increment_percent,
        tenant.increment_interval,
        tenant.start_date,
        today,
    );
    let time_remaining = compute_remaining(tenant.end_date, today);

    Ok(Json(TenantDetail {
        tenant,
        current_rent,
        time_remaining,
    }))
}

pub async fn create_tenant<S: Storage + 'static, C: Clock + 'static>(
    State(state): State<AppState<S, C>>,
    payload: Result<Json<TenantInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Tenant>)> {
    let Json(input) = payload?;
    let tenant = state.ledger.add_tenant(input).await?;
    Ok((StatusCode::CREATED, Json(tenant)))
}

pub async fn update_tenant<S: Storage + 'static, C: Clock + 'static>(
    State(state): State<AppState<S, C>>,
    Path(id): Path<String>,
    payload: Result<Json<TenantInput>, JsonRejection>,
) -> ApiResult<Json<Tenant>> {
    let Json(input) = payload?;
    Ok(Json(state.ledger.update_tenant(&id, input).await?))
}

pub async fn delete_tenant<S: Storage + 'static, C: Clock + 'static>(
    State(state): State<AppState<S, C>>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    state.ledger.delete_tenant(&id).await?;
    Ok(Json(MessageResponse::new("Tenant deleted successfully")))
}
