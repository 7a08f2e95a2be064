//! Query operations for SeaOrmStorage
//!
//! This module contains all read-only database operations.

use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect};
use tracing::debug;

use super::SeaOrmStorage;
use super::converters::{model_to_template, model_to_utm_link};
use crate::errors::{Result, UtmkaError};
use crate::storage::models::{Template, UtmLink};

use migration::entities::{history_link, template};

impl SeaOrmStorage {
    /// 按 owner 加载历史记录（最新在前，限量返回）
    pub async fn list_history_by_owner(&self, owner: &str, limit: u64) -> Result<Vec<UtmLink>> {
        let models = history_link::Entity::find()
            .filter(history_link::Column::Owner.eq(owner))
            .order_by_desc(history_link::Column::CreatedAt)
            .order_by_desc(history_link::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| UtmkaError::database_operation(format!("查询历史记录失败: {}", e)))?;

        debug!("Loaded {} history records for '{}'", models.len(), owner);
        Ok(models.into_iter().map(model_to_utm_link).collect())
    }

    /// 按 owner 加载模板（最新在前，限量返回）
    pub async fn list_templates_by_owner(&self, owner: &str, limit: u64) -> Result<Vec<Template>> {
        let models = template::Entity::find()
            .filter(template::Column::Owner.eq(owner))
            .order_by_desc(template::Column::CreatedAt)
            .order_by_desc(template::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| UtmkaError::database_operation(format!("查询模板失败: {}", e)))?;

        debug!("Loaded {} templates for '{}'", models.len(), owner);
        Ok(models.into_iter().map(model_to_template).collect())
    }

    /// 按 owner 加载全部历史记录（不限量，导出用）
    pub async fn all_history_by_owner(&self, owner: &str) -> Result<Vec<UtmLink>> {
        let models = history_link::Entity::find()
            .filter(history_link::Column::Owner.eq(owner))
            .order_by_desc(history_link::Column::CreatedAt)
            .order_by_desc(history_link::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| UtmkaError::database_operation(format!("导出查询失败: {}", e)))?;

        Ok(models.into_iter().map(model_to_utm_link).collect())
    }

    /// 按 owner 加载全部模板（不限量，导出用）
    pub async fn all_templates_by_owner(&self, owner: &str) -> Result<Vec<Template>> {
        let models = template::Entity::find()
            .filter(template::Column::Owner.eq(owner))
            .order_by_desc(template::Column::CreatedAt)
            .order_by_desc(template::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| UtmkaError::database_operation(format!("导出查询失败: {}", e)))?;

        Ok(models.into_iter().map(model_to_template).collect())
    }

    /// 历史记录总数（健康检查探针用）
    pub async fn count_history(&self) -> Result<u64> {
        history_link::Entity::find()
            .count(&self.db)
            .await
            .map_err(|e| UtmkaError::database_operation(format!("统计历史记录失败: {}", e)))
    }
}
