use super::{CountResponse, MessageResponse};
use crate::domain::model::{Property, PropertyInput};
use crate::domain::ports::{Clock, Storage};
use crate::http::error::ApiResult;
use crate::http::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

pub async fn list_properties<S: Storage + 'static, C: Clock + 'static>(
    State(state): State<AppState<S, C>>,
) -> ApiResult<Json<Vec<Property>>> {
    Ok(Json(state.ledger.list_properties().await?))
}

pub async fn count_properties<S: Storage + 'static, C: Clock + 'static>(
    State(state): State<AppState<S, C>>,
) -> ApiResult<Json<CountResponse>> {
    let total = state.ledger.count_properties().await?;
    Ok(Json(CountResponse { total }))
}

pub async fn get_property<S: Storage + 'static, C: Clock + 'static>(
    State(state): State<AppState<S, C>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Property>> {
    Ok(Json(state.ledger.get_property(&id).await?))
}

pub async fn create_property<S: Storage + 'static, C: Clock + 'static>(
    State(state): State<AppState<S, C>>,
    payload: Result<Json<PropertyInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Property>)> {
    let Json(input) = payload?;
    let property = state.ledger.add_property(input).await?;
    Ok((StatusCode::CREATED, Json(property)))
}

pub async fn update_property<S: Storage + 'static, C: Clock + 'static>(
    State(state): State<AppState<S, C>>,
    Path(id): Path<String>,
    payload: Result<Json<PropertyInput>, JsonRejection>,
) -> ApiResult<Json<Property>> {
    let Json(input) = payload?;
    Ok(Json(state.ledger.update_property(&id, input).await?))
}

pub async fn delete_property<S: Storage + 'static, C: Clock + 'static>(
    State(state): State<AppState<S, C>>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    state.ledger.delete_property(&id).await?;
    Ok(Json(MessageResponse::new("Property deleted successfully")))
}
