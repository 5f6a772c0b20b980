pub mod error;
pub mod handlers;
pub mod state;

use crate::domain::ports::{Clock, Storage};
use axum::{routing::get, Router};
use handlers::{dashboard, health, payments, properties, tenants};
use state::AppState;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

/// JSON API under `/api`, plus the static frontend when `static_dir` is set.
pub fn build_router<S: Storage + 'static, C: Clock + 'static>(
    state: AppState<S, C>,
    static_dir: Option<&str>,
) -> Router {
    let api = Router::new()
        .route(
            "/properties",
            get(properties::list_properties::<S, C>).post(properties::create_property::<S, C>),
        )
        .route("/properties/count", get(properties::count_properties::<S, C>))
        .route(
            "/properties/{id}",
            get(properties::get_property::<S, C>)
                .put(properties::update_property::<S, C>)
                .delete(properties::delete_property::<S, C>),
        )
        .route(
            "/tenants",
            get(tenants::list_tenants::<S, C>).post(tenants::create_tenant::<S, C>),
        )
        .route("/tenants/count", get(tenants::count_tenants::<S, C>))
        .route("/tenants/renewals", get(tenants::renewals::<S, C>))
        .route(
            "/tenants/{id}",
            get(tenants::get_tenant::<S, C>)
                .put(tenants::update_tenant::<S, C>)
                .delete(tenants::delete_tenant::<S, C>),
        )
        .route(
            "/payments",
            get(payments::list_payments::<S, C>).post(payments::record_payment::<S, C>),
        )
        .route("/payments/recent", get(payments::recent_payments::<S, C>))
        .route("/payments/monthly", get(payments::monthly_revenue::<S, C>))
        .route(
            "/payments/{id}",
            get(payments::get_payment::<S, C>).delete(payments::delete_payment::<S, C>),
        )
        .route("/dashboard", get(dashboard::dashboard::<S, C>));

    let mut router = Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", api)
        .with_state(state);

    if let Some(dir) = static_dir {
        tracing::info!("📂 Serving static files from {}", dir);
        router = router.fallback_service(ServeDir::new(dir));
    }

    router
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
