//! Export/import API handlers

use actix_web::{HttpResponse, Responder, Result as ActixResult, web};
use serde_json::{Value, json};
use tracing::{error, info};

use super::helpers::error_from_utmka;
use super::types::ExportRequest;
use crate::errors::UtmkaError;
use crate::export::{ExportFile, ExportFormat};
use crate::services::{HistoryService, TemplateService};

/// 将导出产物包装为带 Content-Disposition 的下载响应
fn attachment_response(file: ExportFile, format: ExportFormat) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(format.content_type())
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{}\"", file.filename),
        ))
        .body(file.content)
}

/// 导出 owner 的历史记录
pub async fn export_history(
    body: web::Json<ExportRequest>,
    service: web::Data<HistoryService>,
) -> ActixResult<impl Responder> {
    let format = match body.format.parse::<ExportFormat>() {
        Ok(format) => format,
        Err(e) => return Ok(error_from_utmka(&e)),
    };

    match service.export(&body.owner, format).await {
        Ok(file) => {
            info!(
                "History API: exported {} records for '{}' as {}",
                file.count, body.owner, format
            );
            Ok(attachment_response(file, format))
        }
        Err(e) => {
            error!("History API: export failed: {}", e);
            Ok(error_from_utmka(&e))
        }
    }
}

/// 导出 owner 的模板
pub async fn export_templates(
    body: web::Json<ExportRequest>,
    service: web::Data<TemplateService>,
) -> ActixResult<impl Responder> {
    let format = match body.format.parse::<ExportFormat>() {
        Ok(format) => format,
        Err(e) => return Ok(error_from_utmka(&e)),
    };

    match service.export(&body.owner, format).await {
        Ok(file) => {
            info!(
                "Template API: exported {} templates for '{}' as {}",
                file.count, body.owner, format
            );
            Ok(attachment_response(file, format))
        }
        Err(e) => {
            error!("Template API: export failed: {}", e);
            Ok(error_from_utmka(&e))
        }
    }
}

/// 导入历史记录，请求体可以是单个对象或数组
pub async fn import_history(
    body: web::Json<Value>,
    service: web::Data<HistoryService>,
) -> ActixResult<impl Responder> {
    let items = match body.into_inner() {
        Value::Array(items) => items,
        single @ Value::Object(_) => vec![single],
        _ => {
            return Ok(error_from_utmka(&UtmkaError::validation(
                "Request body must be an object or an array",
            )));
        }
    };

    let total = items.len();
    match service.import_items(items).await {
        Ok(report) => {
            info!(
                "History API: import completed - total: {}, imported: {}, failed: {}",
                total, report.imported, report.failed
            );
            Ok(HttpResponse::Ok().json(json!({
                "success": true,
                "imported_count": report.imported,
                "failed_count": report.failed,
                "errors": report.errors,
            })))
        }
        Err(e) => {
            error!("History API: import failed: {}", e);
            Ok(error_from_utmka(&e))
        }
    }
}
