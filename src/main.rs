use coupon_service::config::{init_tracing, AppConfig};
use coupon_service::coupons::AppState;
use coupon_service::router::create_app_router;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    init_tracing(&config.log_level, config.log_json);

    // Initialize application state
    let state = Arc::new(AppState::new());

    // Build application router with all routes and middleware
    let app = create_app_router(state);

    // Start the server
    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server running on http://{} (in-memory, data resets on restart)", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
