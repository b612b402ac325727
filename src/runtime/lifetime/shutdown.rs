use tokio::signal;
use tracing::{info, warn};

use super::startup::StartupContext;

/// 等待 Ctrl+C 信号
pub async fn wait_for_ctrl_c() {
    match signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => warn!(
            "Failed to listen for Ctrl+C: {}. Proceeding with shutdown anyway.",
            e
        ),
    }
}

/// 停止后台任务；内存中的链接随进程退出而丢弃
pub fn shutdown(ctx: StartupContext) {
    let remaining = ctx.service.len();
    ctx.scheduler.stop();
    info!(
        "Shutdown complete, {} in-memory links discarded",
        remaining
    );
}
