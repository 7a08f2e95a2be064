use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::config::get_config;
use crate::preferences::PreferencesStore;
use crate::services::{HistoryService, TemplateService};
use crate::storage::{SeaOrmStorage, StorageFactory};

pub struct StartupContext {
    pub storage: Arc<SeaOrmStorage>,
    pub history_service: Arc<HistoryService>,
    pub template_service: Arc<TemplateService>,
    pub preferences_store: Arc<PreferencesStore>,
}

/// 准备服务器启动的上下文
/// 包括存储、服务层和偏好存储
pub async fn prepare_server_startup() -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let storage = StorageFactory::create()
        .await
        .context("Failed to create storage backend")?;
    info!("Using storage backend: {}", storage.backend_name());

    let history_service = Arc::new(HistoryService::new(storage.clone()));
    let template_service = Arc::new(TemplateService::new(storage.clone()));

    let config = get_config();
    let preferences_store = Arc::new(PreferencesStore::new(Path::new(&config.data.dir)));
    debug!("Preferences store initialized in {}", config.data.dir);

    debug!(
        "Pre-startup processing completed in {} ms",
        start_time.elapsed().as_millis()
    );

    Ok(StartupContext {
        storage,
        history_service,
        template_service,
        preferences_store,
    })
}
