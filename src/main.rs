use payment_checkout::config::AppConfig;
use payment_checkout::gateways::mock::{MockBehavior, MockGateway};
use payment_checkout::gateways::paytech::PaytechGateway;
use payment_checkout::gateways::PaymentGateway;
use payment_checkout::http::views::Views;
use payment_checkout::repo::idempotency_keys_repo::IdempotencyKeysRepo;
use payment_checkout::service::payment_service::PaymentService;
use payment_checkout::{build_router, AppState};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cfg = AppConfig::from_env();

    let pool = PgPoolOptions::new()
        .max_connections(cfg.db_max_connections)
        .connect(&cfg.database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    let gateway: Arc<dyn PaymentGateway> = if cfg.gateway_adapter == "MOCK" {
        tracing::warn!("using mock payment gateway, no real payments will be created");
        Arc::new(MockGateway::new(MockBehavior::AlwaysSuccess))
    } else {
        Arc::new(PaytechGateway::new(cfg.gateway.clone()))
    };
    tracing::info!("payment gateway: {} ({:?})", gateway.name(), cfg.gateway);

    let payment_service = PaymentService::new(Arc::new(IdempotencyKeysRepo { pool }), gateway);

    let state = AppState {
        payment_service,
        views: Arc::new(Views::new()?),
    };

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr).await?;
    tracing::info!("listening on {}", cfg.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
