//! Mutation operations for SeaOrmStorage
//!
//! This module contains all write database operations.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, sea_query::Expr};
use tracing::info;

use super::SeaOrmStorage;
use super::converters::{
    model_to_template, model_to_utm_link, new_template_to_active_model, new_utm_link_to_active_model,
};
use crate::errors::{Result, UtmkaError};
use crate::storage::models::{NewTemplate, NewUtmLink, Template, UtmLink};

use migration::entities::{history_link, template};

impl SeaOrmStorage {
    /// 插入历史记录，返回完整记录（含数据库分配的 id）
    pub async fn insert_history(&self, link: &NewUtmLink) -> Result<UtmLink> {
        let active = new_utm_link_to_active_model(link, Utc::now());
        let model = active
            .insert(&self.db)
            .await
            .map_err(|e| UtmkaError::database_operation(format!("插入历史记录失败: {}", e)))?;

        info!("History record created: id={}", model.id);
        Ok(model_to_utm_link(model))
    }

    /// 删除历史记录，记录不存在返回 false
    pub async fn delete_history(&self, id: i64) -> Result<bool> {
        let result = history_link::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| UtmkaError::database_operation(format!("删除历史记录失败: {}", e)))?;

        if result.rows_affected == 0 {
            return Ok(false);
        }

        info!("History record deleted: {}", id);
        Ok(true)
    }

    /// 更新历史记录的短链接字段，记录不存在返回 false
    pub async fn update_history_short_url(&self, id: i64, short_url: &str) -> Result<bool> {
        let result = history_link::Entity::update_many()
            .col_expr(history_link::Column::ShortUrl, Expr::value(short_url))
            .filter(history_link::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| UtmkaError::database_operation(format!("更新短链接失败: {}", e)))?;

        if result.rows_affected == 0 {
            return Ok(false);
        }

        info!("Short URL saved for history record {}", id);
        Ok(true)
    }

    /// 插入模板，返回完整记录（含数据库分配的 id）
    pub async fn insert_template(&self, tpl: &NewTemplate) -> Result<Template> {
        let active = new_template_to_active_model(tpl, Utc::now());
        let model = active
            .insert(&self.db)
            .await
            .map_err(|e| UtmkaError::database_operation(format!("插入模板失败: {}", e)))?;

        info!("Template created: id={}, name={}", model.id, model.name);
        Ok(model_to_template(model))
    }

    /// 删除模板，记录不存在返回 false
    pub async fn delete_template(&self, id: i64) -> Result<bool> {
        let result = template::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| UtmkaError::database_operation(format!("删除模板失败: {}", e)))?;

        if result.rows_affected == 0 {
            return Ok(false);
        }

        info!("Template deleted: {}", id);
        Ok(true)
    }
}
