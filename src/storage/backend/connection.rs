use std::str::FromStr;
use std::time::Duration;

use sea_orm::sqlx::SqlitePool;
use sea_orm::sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqliteSynchronous};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, SqlxSqliteConnector};
use tracing::{debug, info};

use crate::errors::{Result, UtmkaError};
use migration::{Migrator, MigratorTrait};

/// SQLite 连接参数：自动建库 + WAL + 查询性能 pragma
fn sqlite_options(database_url: &str) -> Result<SqliteConnectOptions> {
    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| UtmkaError::database_config(format!("SQLite 连接串无法解析: {}", e)))?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .busy_timeout(Duration::from_secs(5))
        .pragma("cache_size", "-64000")
        .pragma("temp_store", "memory")
        .pragma("mmap_size", "536870912")
        .pragma("wal_autocheckpoint", "1000");
    Ok(options)
}

/// 连接 SQLite 数据库
pub async fn connect_sqlite(database_url: &str) -> Result<DatabaseConnection> {
    let pool = SqlitePool::connect_with(sqlite_options(database_url)?)
        .await
        .map_err(|e| UtmkaError::database_connection(format!("SQLite 连接失败: {}", e)))?;

    debug!("SQLite pool ready: {}", database_url);
    Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
}

/// 连接 MySQL/PostgreSQL，池参数取自配置
pub async fn connect_generic(database_url: &str, backend_name: &str) -> Result<DatabaseConnection> {
    let config = crate::config::get_config();
    let timeout = Duration::from_secs(config.database.timeout);

    let mut options = ConnectOptions::new(database_url.to_owned());
    options
        .max_connections(config.database.pool_size)
        .min_connections(config.database.pool_size.min(5))
        .connect_timeout(timeout)
        .acquire_timeout(timeout)
        .idle_timeout(Duration::from_secs(300))
        .max_lifetime(Duration::from_secs(3600))
        .sqlx_logging(false);

    Database::connect(options).await.map_err(|e| {
        UtmkaError::database_connection(format!(
            "无法建立 {} 连接: {}",
            backend_name.to_uppercase(),
            e
        ))
    })
}

/// 启动时执行全部未应用的迁移
pub async fn run_migrations(db: &DatabaseConnection) -> Result<()> {
    Migrator::up(db, None)
        .await
        .map_err(|e| UtmkaError::database_operation(format!("数据库迁移执行失败: {}", e)))?;

    info!("Database migrations completed");
    Ok(())
}
