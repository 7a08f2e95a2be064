use std::time::Duration;

use sea_orm::DatabaseConnection;
use tokio::signal;
use tokio::time::timeout;
use tracing::{error, info, warn};

/// 关闭流程的总超时（秒）
const SHUTDOWN_TIMEOUT_SECS: u64 = 30;

/// 阻塞到收到 Ctrl+C，然后在超时内完成收尾
///
/// 唯一的收尾任务是关闭数据库连接，SQLite 在这一步把 WAL 落盘。
pub async fn listen_for_shutdown(db: &DatabaseConnection) {
    match signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received, flushing data..."),
        Err(e) => warn!("Failed to listen for Ctrl+C: {}. Shutting down anyway.", e),
    }

    match timeout(Duration::from_secs(SHUTDOWN_TIMEOUT_SECS), close_database(db)).await {
        Ok(()) => info!("All shutdown tasks completed successfully"),
        Err(_) => {
            error!(
                "Shutdown timed out after {} seconds! Forcing exit.",
                SHUTDOWN_TIMEOUT_SECS
            );
            std::process::exit(1);
        }
    }
}

async fn close_database(db: &DatabaseConnection) {
    // close 按值消费连接，克隆的只是池句柄
    match db.clone().close().await {
        Ok(()) => info!("Database connection closed"),
        Err(e) => error!("Failed to close database connection: {}", e),
    }
}
