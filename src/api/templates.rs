//! Template API handlers

use actix_web::{HttpResponse, Responder, Result as ActixResult, web};
use serde_json::{Value, json};
use tracing::{error, info, trace};

use super::helpers::{error_from_utmka, list_response, not_found_response};
use super::types::OwnerQuery;
use crate::errors::UtmkaError;
use crate::services::TemplateService;

/// 获取 owner 的模板列表
pub async fn list_templates(
    query: web::Query<OwnerQuery>,
    service: web::Data<TemplateService>,
) -> ActixResult<impl Responder> {
    trace!("Template API: list request for '{}'", query.owner);

    match service.list(&query.owner).await {
        Ok(items) => {
            info!(
                "Template API: returning {} templates for '{}'",
                items.len(),
                query.owner
            );
            Ok(list_response(&items))
        }
        Err(e) => {
            error!("Template API: list failed: {}", e);
            Ok(error_from_utmka(&e))
        }
    }
}

/// 保存模板，请求体可以是单个对象或数组
pub async fn add_templates(
    body: web::Json<Value>,
    service: web::Data<TemplateService>,
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

    match service.add_many(items).await {
        Ok(report) => {
            info!(
                "Template API: saved {} templates, {} failed",
                report.imported, report.failed
            );
            Ok(HttpResponse::Ok().json(json!({
                "success": true,
                "imported_count": report.imported,
                "failed_count": report.failed,
                "errors": report.errors,
            })))
        }
        Err(e) => {
            error!("Template API: save failed: {}", e);
            Ok(error_from_utmka(&e))
        }
    }
}

/// 删除一个模板
pub async fn delete_template(
    path: web::Path<i64>,
    service: web::Data<TemplateService>,
) -> ActixResult<impl Responder> {
    let id = path.into_inner();

    match service.delete(id).await {
        Ok(true) => {
            info!("Template API: deleted template {}", id);
            Ok(HttpResponse::Ok().json(json!({ "success": true })))
        }
        Ok(false) => Ok(not_found_response("Template", id)),
        Err(e) => {
            error!("Template API: delete failed: {}", e);
            Ok(error_from_utmka(&e))
        }
    }
}
