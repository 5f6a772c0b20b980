use super::MessageResponse;
use crate::core::dashboard::MonthlyRevenue;
use crate::domain::model::{Payment, PaymentFilter, PaymentInput};
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
use serde::Deserialize;

const MAX_RECENT_LIMIT: usize = 100;

#[derive(Debug, Default, Deserialize)]
pub struct RecentQuery {
    pub limit: Option<usize>,
}

pub async fn list_payments<S: Storage + 'static, C: Clock + 'static>(
    State(state): State<AppState<S, C>>,
    filter: Result<Query<PaymentFilter>, QueryRejection>,
) -> ApiResult<Json<Vec<Payment>>> {
    let Query(filter) = filter?;
    Ok(Json(state.ledger.list_payments(&filter).await?))
}

pub async fn recent_payments<S: Storage + 'static, C: Clock + 'static>(
    State(state): State<AppState<S, C>>,
    query: Result<Query<RecentQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Payment>>> {
    let Query(query) = query?;
    if let Some(limit) = query.limit {
        if limit == 0 || limit > MAX_RECENT_LIMIT {
            return Err(ApiError::BadRequest(format!(
                "limit must be between 1 and {}",
                MAX_RECENT_LIMIT
            )));
        }
    }

    Ok(Json(state.ledger.recent_payments(query.limit).await?))
}

pub async fn monthly_revenue<S: Storage + 'static, C: Clock + 'static>(
    State(state): State<AppState<S, C>>,
) -> ApiResult<Json<MonthlyRevenue>> {
    Ok(Json(state.ledger.monthly_revenue().await?))
}

pub async fn get_payment<S: Storage + 'static, C: Clock + 'static>(
    State(state): State<AppState<S, C>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Payment>> {
    Ok(Json(state.ledger.get_payment(&id).await?))
}

pub async fn record_payment<S: Storage + 'static, C: Clock + 'static>(
    State(state): State<AppState<S, C>>,
    payload: Result<Json<PaymentInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Payment>)> {
    let Json(input) = payload?;
    let payment = state.ledger.record_payment(input).await?;
    Ok((StatusCode::CREATED, Json(payment)))
}

pub async fn delete_payment<S: Storage + 'static, C: Clock + 'static>(
    State(state): State<AppState<S, C>>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    state.ledger.delete_payment(&id).await?;
    Ok(Json(MessageResponse::new("Payment deleted successfully")))
}
