use crate::core::dashboard::Dashboard;
use crate::domain::ports::{Clock, Storage};
use crate::http::error::ApiResult;
use crate::http::state::AppState;
use axum::{extract::State, Json};

pub async fn dashboard<S: Storage + 'static, C: Clock + 'static>(
    State(state): State<AppState<S, C>>,
) -> ApiResult<Json<Dashboard>> {
    let summary = state.ledger.dashboard().await?;
    tracing::debug!(
        "Dashboard: {} properties, {} active tenants, {} renewals",
        summary.property_count,
        summary.active_tenant_count,
        summary.upcoming_renewals.len()
    );
    Ok(Json(summary))
}
