//! History record service
//!
//! Derives the stored URL fields from a submitted link, enforces validation,
//! and orchestrates record store calls for the history endpoints.

use std::sync::Arc;

use serde_json::Value;
use tracing::info;

use crate::config::get_config;
use crate::errors::{Result, UtmkaError};
use crate::export::{self, ExportFile, ExportFormat, HistoryImportRow};
use crate::services::ImportReport;
use crate::storage::{NewUtmLink, SeaOrmStorage, UtmLink};
use crate::utm::{extract_base_url, normalize_url, parse_utm_params};

/// Service for history record operations
pub struct HistoryService {
    storage: Arc<SeaOrmStorage>,
}

impl HistoryService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    fn list_limit(&self) -> u64 {
        get_config().history.list_limit
    }

    /// 保存一条链接记录
    ///
    /// URL 相关字段一律由服务端从提交的链接推导，请求中的其他字段被忽略。
    pub async fn add(&self, owner: &str, url: &str) -> Result<UtmLink> {
        let owner = owner.trim();
        if owner.is_empty() {
            return Err(UtmkaError::validation("owner is required"));
        }
        if url.trim().is_empty() {
            return Err(UtmkaError::validation("full_url is required"));
        }

        let full_url = normalize_url(url.trim());
        let base_url = extract_base_url(&full_url);
        let params = parse_utm_params(&full_url);

        let new_link = NewUtmLink {
            owner: owner.to_string(),
            base_url,
            full_url,
            utm_source: params.source,
            utm_medium: params.medium,
            utm_campaign: params.campaign,
            utm_content: params.content,
            utm_term: params.term,
            ..Default::default()
        };

        let link = self.storage.insert_history(&new_link).await?;
        info!("HistoryService: saved record {} for '{}'", link.id, link.owner);
        Ok(link)
    }

    /// 列出 owner 的历史记录，owner 为空时返回空列表
    pub async fn list(&self, owner: &str) -> Result<Vec<UtmLink>> {
        let owner = owner.trim();
        if owner.is_empty() {
            return Ok(Vec::new());
        }
        self.storage
            .list_history_by_owner(owner, self.list_limit())
            .await
    }

    /// 删除记录，不存在返回 Ok(false)
    pub async fn delete(&self, id: i64) -> Result<bool> {
        self.storage.delete_history(id).await
    }

    /// 更新短链接字段，空值报校验错误，未知 id 返回 Ok(false)
    pub async fn update_short_url(&self, id: i64, short_url: &str) -> Result<bool> {
        let short_url = short_url.trim();
        if short_url.is_empty() {
            return Err(UtmkaError::validation("short_url is required"));
        }
        self.storage.update_history_short_url(id, short_url).await
    }

    /// 批量导入历史记录
    ///
    /// 逐行校验并插入，单行失败只记入报告，不中断整批。行内缺失的
    /// base_url 由 full_url 推导。
    pub async fn import_items(&self, items: Vec<Value>) -> Result<ImportReport> {
        let mut report = ImportReport::default();

        for (idx, value) in items.into_iter().enumerate() {
            let row_num = idx + 1;

            let row: HistoryImportRow = match serde_json::from_value(value) {
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
            if row.full_url.trim().is_empty() {
                report.push_failure(row_num, "full_url is required");
                continue;
            }

            let full_url = normalize_url(row.full_url.trim());
            let base_url = if row.base_url.trim().is_empty() {
                extract_base_url(&full_url)
            } else {
                row.base_url.trim().to_string()
            };

            let new_link = NewUtmLink {
                owner: row.owner.trim().to_string(),
                base_url,
                full_url,
                utm_source: row.utm_source,
                utm_medium: row.utm_medium,
                utm_campaign: row.utm_campaign,
                utm_content: row.utm_content,
                utm_term: row.utm_term,
                short_url: row.short_url,
                tag_name: row.tag_name,
                tag_color: row.tag_color,
            };

            if let Err(e) = self.storage.insert_history(&new_link).await {
                report.push_failure(row_num, e.message());
                continue;
            }
            report.imported += 1;
        }

        info!(
            "HistoryService: import completed - imported: {}, failed: {}",
            report.imported, report.failed
        );
        Ok(report)
    }

    /// 导出 owner 的全部历史记录（最新在前）
    pub async fn export(&self, owner: &str, format: ExportFormat) -> Result<ExportFile> {
        let owner = owner.trim();
        if owner.is_empty() {
            return Err(UtmkaError::validation("owner is required"));
        }

        let records = self.storage.all_history_by_owner(owner).await?;
        let rows = export::history_rows(&records);
        let content = export::encode(&rows, format)?;

        let file = ExportFile {
            filename: export::suggested_filename("utm_history", owner, format),
            count: rows.len(),
            content,
        };
        info!(
            "HistoryService: exported {} records for '{}' as {}",
            file.count, owner, format
        );
        Ok(file)
    }
}
