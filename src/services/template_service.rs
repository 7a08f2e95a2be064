//! Template service
//!
//! Validates and persists reusable UTM parameter sets scoped by owner.

use std::sync::Arc;

use serde_json::Value;
use tracing::info;

use crate::config::get_config;
use crate::errors::{Result, UtmkaError};
use crate::export::{self, ExportFile, ExportFormat, TemplateImportRow};
use crate::services::ImportReport;
use crate::storage::{NewTemplate, SeaOrmStorage, Template};

/// Service for template operations
pub struct TemplateService {
    storage: Arc<SeaOrmStorage>,
}

impl TemplateService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    fn list_limit(&self) -> u64 {
        get_config().history.list_limit
    }

    /// 列出 owner 的模板，owner 为空时返回空列表
    pub async fn list(&self, owner: &str) -> Result<Vec<Template>> {
        let owner = owner.trim();
        if owner.is_empty() {
            return Ok(Vec::new());
        }
        self.storage
            .list_templates_by_owner(owner, self.list_limit())
            .await
    }

    /// 批量保存模板（单条请求按一行处理）
    ///
    /// 逐行校验 owner 与 name，失败的行只记入报告，不中断整批。
    pub async fn add_many(&self, items: Vec<Value>) -> Result<ImportReport> {
        let mut report = ImportReport::default();

        for (idx, value) in items.into_iter().enumerate() {
            let row_num = idx + 1;

            let row: TemplateImportRow = match serde_json::from_value(value) {
                Ok(row) => row,
                Err(e) => {
                    report.push_failure(row_num, format!("invalid row: {}", e));
                    continue;
                }
            };

            if row.owner.trim().is_empty() {
                report.push_failure(row_num, "owner is required");
                continue;
            }
            if row.name.trim().is_empty() {
                report.push_failure(row_num, "name is required");
                continue;
            }

            let new_template = NewTemplate {
                owner: row.owner.trim().to_string(),
                name: row.name.trim().to_string(),
                utm_source: row.utm_source,
                utm_medium: row.utm_medium,
                utm_campaign: row.utm_campaign,
                utm_content: row.utm_content,
                utm_term: row.utm_term,
                tag_name: row.tag_name,
                tag_color: row.tag_color,
            };

            if let Err(e) = self.storage.insert_template(&new_template).await {
                report.push_failure(row_num, e.message());
                continue;
            }
            report.imported += 1;
        }

        info!(
            "TemplateService: saved {} templates, {} failed",
            report.imported, report.failed
        );
        Ok(report)
    }

    /// 删除模板，不存在返回 Ok(false)
    pub async fn delete(&self, id: i64) -> Result<bool> {
        self.storage.delete_template(id).await
    }

    /// 导出 owner 的全部模板（最新在前）
    pub async fn export(&self, owner: &str, format: ExportFormat) -> Result<ExportFile> {
        let owner = owner.trim();
        if owner.is_empty() {
            return Err(UtmkaError::validation("owner is required"));
        }

        let records = self.storage.all_templates_by_owner(owner).await?;
        let rows = export::template_rows(&records);
        let content = export::encode(&rows, format)?;

        let file = ExportFile {
            filename: export::suggested_filename("utm_templates", owner, format),
            count: rows.len(),
            content,
        };
        info!(
            "TemplateService: exported {} templates for '{}' as {}",
            file.count, owner, format
        );
        Ok(file)
    }
}
