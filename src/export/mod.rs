//! Export/import codec for history records and templates
//!
//! 序列化记录列表为 JSON 或 CSV，并定义导入行的反序列化形状。
//! 导出行不携带 owner/id/created_at，便于跨账号迁移。

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, UtmkaError};
use crate::storage::models::{Template, UtmLink};

/// 导出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json; charset=utf-8",
            ExportFormat::Csv => "text/csv; charset=utf-8",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = UtmkaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(UtmkaError::validation(format!("Invalid format: {}", other))),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// 一次导出的产物
#[derive(Debug, Clone)]
pub struct ExportFile {
    pub filename: String,
    pub content: String,
    pub count: usize,
}

/// 历史记录导出行
#[derive(Debug, Clone, Serialize)]
pub struct HistoryExportRow {
    pub base_url: String,
    pub full_url: String,
    pub utm_source: Option<String>,
    pub utm_medium: Option<String>,
    pub utm_campaign: Option<String>,
    pub utm_content: Option<String>,
    pub utm_term: Option<String>,
    pub short_url: Option<String>,
    pub tag_name: Option<String>,
    pub tag_color: Option<String>,
}

/// 历史记录导入行（字段均可缺省，逐行校验放在服务层）
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryImportRow {
    #[serde(default, alias = "user_email")]
    pub owner: String,
    #[serde(default)]
    pub base_url: String,
    #[serde(default, alias = "url")]
    pub full_url: String,
    #[serde(default)]
    pub utm_source: Option<String>,
    #[serde(default)]
    pub utm_medium: Option<String>,
    #[serde(default)]
    pub utm_campaign: Option<String>,
    #[serde(default)]
    pub utm_content: Option<String>,
    #[serde(default)]
    pub utm_term: Option<String>,
    #[serde(default)]
    pub short_url: Option<String>,
    #[serde(default)]
    pub tag_name: Option<String>,
    #[serde(default)]
    pub tag_color: Option<String>,
}

/// 模板导出行
#[derive(Debug, Clone, Serialize)]
pub struct TemplateExportRow {
    pub name: String,
    pub utm_source: Option<String>,
    pub utm_medium: Option<String>,
    pub utm_campaign: Option<String>,
    pub utm_content: Option<String>,
    pub utm_term: Option<String>,
    pub tag_name: Option<String>,
    pub tag_color: Option<String>,
}

/// 模板导入行
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemplateImportRow {
    #[serde(default, alias = "user_email")]
    pub owner: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub utm_source: Option<String>,
    #[serde(default)]
    pub utm_medium: Option<String>,
    #[serde(default)]
    pub utm_campaign: Option<String>,
    #[serde(default)]
    pub utm_content: Option<String>,
    #[serde(default)]
    pub utm_term: Option<String>,
    #[serde(default)]
    pub tag_name: Option<String>,
    #[serde(default)]
    pub tag_color: Option<String>,
}

/// 历史记录转导出行
pub fn history_rows(records: &[UtmLink]) -> Vec<HistoryExportRow> {
    records
        .iter()
        .map(|link| HistoryExportRow {
            base_url: link.base_url.clone(),
            full_url: link.full_url.clone(),
            utm_source: link.utm_source.clone(),
            utm_medium: link.utm_medium.clone(),
            utm_campaign: link.utm_campaign.clone(),
            utm_content: link.utm_content.clone(),
            utm_term: link.utm_term.clone(),
            short_url: link.short_url.clone(),
            tag_name: link.tag_name.clone(),
            tag_color: link.tag_color.clone(),
        })
        .collect()
}

/// 模板转导出行
pub fn template_rows(records: &[Template]) -> Vec<TemplateExportRow> {
    records
        .iter()
        .map(|tpl| TemplateExportRow {
            name: tpl.name.clone(),
            utm_source: tpl.utm_source.clone(),
            utm_medium: tpl.utm_medium.clone(),
            utm_campaign: tpl.utm_campaign.clone(),
            utm_content: tpl.utm_content.clone(),
            utm_term: tpl.utm_term.clone(),
            tag_name: tpl.tag_name.clone(),
            tag_color: tpl.tag_color.clone(),
        })
        .collect()
}

/// 按指定格式编码导出行
pub fn encode<T: Serialize>(rows: &[T], format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Json => to_json(rows),
        ExportFormat::Csv => to_csv(rows),
    }
}

/// JSON 导出（缩进数组）
pub fn to_json<T: Serialize>(rows: &[T]) -> Result<String> {
    serde_json::to_string_pretty(rows)
        .map_err(|e| UtmkaError::serialization(format!("JSON 导出失败: {}", e)))
}

/// CSV 导出（表头由字段名生成；空列表输出为空内容，不报错）
pub fn to_csv<T: Serialize>(rows: &[T]) -> Result<String> {
    let mut wtr = csv::WriterBuilder::new().from_writer(Vec::new());
    for row in rows {
        wtr.serialize(row)
            .map_err(|e| UtmkaError::serialization(format!("CSV 导出失败: {}", e)))?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| UtmkaError::serialization(format!("CSV 导出失败: {}", e)))?;
    String::from_utf8(bytes).map_err(|e| UtmkaError::serialization(format!("CSV 导出失败: {}", e)))
}

/// 建议的导出文件名（owner 中的 '@' 替换为 '_'）
pub fn suggested_filename(prefix: &str, owner: &str, format: ExportFormat) -> String {
    format!("{}_{}.{}", prefix, owner.replace('@', "_"), format.extension())
}
