use std::sync::Arc;

use sqlx::PgPool;

use crate::config;
use crate::notify::NotificationHub;
use crate::scheduling::SlotScheduler;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub env: config::Config,
    pub scheduler: Arc<SlotScheduler>,
    pub notifier: NotificationHub,
}

impl AppState {
    pub fn new(
        db: PgPool,
        env: config::Config,
        scheduler: Arc<SlotScheduler>,
        notifier: NotificationHub,
    ) -> Self {
        Self {
            db,
            env,
            scheduler,
            notifier,
        }
    }
}
