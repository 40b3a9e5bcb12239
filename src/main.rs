use std::sync::Arc;

use anyhow::Context;
use dotenv::dotenv;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use booking_backend::{
    app::create_router,
    app_state::AppState,
    config, db,
    notify::NotificationHub,
    scheduling::{PgSchedulerStore, SlotScheduler},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=debug", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenv().ok();

    let env = config::init().context("Failed to load configuration")?.clone();

    let pool = db::init_pool()
        .await
        .context("Failed to initialize database pool")?;

    let notifier = NotificationHub::new();
    let store = Arc::new(PgSchedulerStore::new(pool.clone()));
    let scheduler = Arc::new(SlotScheduler::new(store, notifier.clone()));

    let state = AppState::new(pool, env.clone(), scheduler, notifier);
    let app = create_router(state);

    let addr = env.server_addr();
    info!("{} listening on {}", env.app.name, addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .await
        .context("Failed to serve application")?;

    Ok(())
}
