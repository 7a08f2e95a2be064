//! Service layer for business logic
//!
//! This module provides unified business logic shared by all HTTP handlers:
//! URL field derivation, validation, and store orchestration.

mod history_service;
mod template_service;

use serde::Serialize;

pub use history_service::HistoryService;
pub use template_service::TemplateService;

/// 批量导入结果
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportReport {
    pub imported: usize,
    pub failed: usize,
    pub errors: Vec<ImportRowError>,
}

/// 单行导入错误
#[derive(Debug, Clone, Serialize)]
pub struct ImportRowError {
    pub row: usize,
    pub message: String,
}

impl ImportReport {
    /// 记录一行失败（row 从 1 开始计数）
    pub fn push_failure(&mut self, row: usize, message: impl Into<String>) {
        self.failed += 1;
        self.errors.push(ImportRowError {
            row,
            message: message.into(),
        });
    }
}
