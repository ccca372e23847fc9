use sea_orm::Database;
use tracing::info;

use storefront_auth_types::identity::JwtSecret;
use storefront_core::config::Config as _;
use storefront_core::tracing::init_tracing;

use storefront_api::config::ApiConfig;
use storefront_api::infra::braintree::BraintreeGateway;
use storefront_api::router::build_router;
use storefront_api::state::AppState;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = ApiConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let gateway = BraintreeGateway::new(
        config.braintree_environment,
        &config.braintree_merchant_id,
        &config.braintree_public_key,
        &config.braintree_private_key,
    )
    .expect("failed to build Braintree client");

    let state = AppState {
        db,
        jwt_secret: JwtSecret::new(config.jwt_secret),
        gateway,
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.api_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!(
        environment = ?config.braintree_environment,
        "storefront api listening on {addr}"
    );
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
    }
    info!("shutting down");
}
