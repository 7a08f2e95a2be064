//! SeaORM storage backend
//!
//! 同一套查询和变更代码跑在 SQLite、MySQL/MariaDB、PostgreSQL 上，
//! 具体后端由连接 URL 决定。

mod connection;
mod converters;
mod mutations;
mod query;

use sea_orm::DatabaseConnection;
use tracing::warn;

use crate::errors::{Result, UtmkaError};

pub use connection::{connect_generic, connect_sqlite, run_migrations};
pub use converters::{
    model_to_template, model_to_utm_link, new_template_to_active_model, new_utm_link_to_active_model,
};

/// 从数据库 URL 推断后端类型
///
/// 带 scheme 的 URL 按 scheme 判断；无 scheme 的路径只有
/// `.db`/`.sqlite` 后缀或 `:memory:` 被当作 SQLite。
pub fn infer_backend_from_url(database_url: &str) -> Result<String> {
    let backend = match database_url.split_once("://") {
        Some(("sqlite", _)) => Some("sqlite"),
        Some(("mysql" | "mariadb", _)) => Some("mysql"),
        Some(("postgres" | "postgresql", _)) => Some("postgres"),
        Some(_) => None,
        None => {
            if database_url == ":memory:"
                || database_url.ends_with(".db")
                || database_url.ends_with(".sqlite")
            {
                Some("sqlite")
            } else {
                None
            }
        }
    };

    backend.map(str::to_string).ok_or_else(|| {
        UtmkaError::database_config(format!(
            "无法从 URL 推断数据库类型: {}. 支持 sqlite://, mysql://, mariadb://, postgres://",
            database_url
        ))
    })
}

/// SeaORM-based storage backend
#[derive(Clone)]
pub struct SeaOrmStorage {
    db: DatabaseConnection,
    backend_name: String,
}

impl SeaOrmStorage {
    /// 建立连接并把迁移跑到最新
    pub async fn new(database_url: &str, backend_name: &str) -> Result<Self> {
        if database_url.is_empty() {
            return Err(UtmkaError::database_config("DATABASE_URL 未设置"));
        }

        let db = match backend_name {
            "sqlite" => connect_sqlite(database_url).await?,
            other => connect_generic(database_url, other).await?,
        };

        run_migrations(&db).await?;
        warn!("{} Storage initialized.", backend_name.to_uppercase());

        Ok(SeaOrmStorage {
            db,
            backend_name: backend_name.to_string(),
        })
    }

    pub fn backend_name(&self) -> &str {
        &self.backend_name
    }

    /// 获取数据库连接（关闭流程等需要直接访问时用）
    pub fn get_db(&self) -> &DatabaseConnection {
        &self.db
    }
}
