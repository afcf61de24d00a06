pub mod config;
pub mod domain {
    pub mod idempotency;
    pub mod payment;
}
pub mod error;
pub mod gateways;
pub mod http {
    pub mod handlers {
        pub mod ops;
        pub mod payments;
    }
    pub mod views;
}
pub mod repo {
    pub mod idempotency_keys_repo;
    pub mod in_memory;
}
pub mod service {
    pub mod payment_service;
}

use axum::routing::get;
use axum::Router;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub payment_service: service::payment_service::PaymentService,
    pub views: Arc<http::views::Views>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(http::handlers::payments::home))
        .route(
            "/payment",
            get(http::handlers::payments::show_payment_form)
                .post(http::handlers::payments::process_payment),
        )
        .route("/health", get(http::handlers::ops::liveness))
        .route("/ops/readiness", get(http::handlers::ops::readiness))
        .route("/ops/liveness", get(http::handlers::ops::liveness))
        .with_state(state)
}
