use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::config::{StaticConfig, get_config};
use crate::runtime::scheduler::CleanupScheduler;
use crate::services::{InMemoryNotifier, LinkLifecycleService};
use crate::storage::InMemoryLinkStore;

/// Everything a front end needs once the process is wired up
pub struct StartupContext {
    pub service: Arc<LinkLifecycleService>,
    pub notifier: Arc<InMemoryNotifier>,
    pub scheduler: CleanupScheduler,
}

/// 构建存储、通知、服务，并启动后台清理任务
///
/// Must run inside a tokio runtime because the scheduler spawns a task.
pub fn prepare_startup() -> Result<StartupContext> {
    let config = get_config();
    prepare_startup_with(&config)
}

pub fn prepare_startup_with(config: &StaticConfig) -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    config.validate().context("Invalid configuration")?;

    let store = Arc::new(InMemoryLinkStore::new());
    let notifier = Arc::new(InMemoryNotifier::new());
    let service = Arc::new(LinkLifecycleService::new(
        store,
        notifier.clone(),
        config.link.clone(),
    ));
    debug!(
        "Link service ready: code_length={}, max_attempts={}, default_ttl={}s, default_max_clicks={}",
        config.link.code_length,
        config.link.max_short_gen_attempts,
        config.link.default_ttl_seconds,
        config.link.default_max_clicks
    );

    let scheduler = CleanupScheduler::start(
        service.clone(),
        Duration::from_secs(config.app.cleanup_interval_seconds),
    );

    info!("Startup completed in {:?}", start_time.elapsed());
    Ok(StartupContext {
        service,
        notifier,
        scheduler,
    })
}
