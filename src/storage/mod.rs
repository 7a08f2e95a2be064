//! Record store
//!
//! SeaORM 之上的持久层：历史记录和模板两张表，按 owner 隔离。

use std::sync::Arc;

use crate::errors::Result;

pub mod backend;
pub mod models;

pub use backend::SeaOrmStorage;
pub use models::{NewTemplate, NewUtmLink, Template, UtmLink};

pub struct StorageFactory;

impl StorageFactory {
    /// 按配置的 database_url 推断后端并完成连接和迁移
    pub async fn create() -> Result<Arc<SeaOrmStorage>> {
        let url = crate::config::get_config().database.database_url.clone();
        let backend = backend::infer_backend_from_url(&url)?;
        Ok(Arc::new(SeaOrmStorage::new(&url, &backend).await?))
    }
}
