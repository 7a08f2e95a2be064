//! History API handlers

use actix_web::{HttpResponse, Responder, Result as ActixResult, web};
use serde_json::json;
use tracing::{error, info, trace};

use super::helpers::{error_from_utmka, list_response, not_found_response};
use super::types::{OwnerQuery, SaveHistoryRequest, ShortUrlRequest};
use crate::services::HistoryService;

/// 获取 owner 的历史记录列表
pub async fn list_history(
    query: web::Query<OwnerQuery>,
    service: web::Data<HistoryService>,
) -> ActixResult<impl Responder> {
    trace!("History API: list request for '{}'", query.owner);

    match service.list(&query.owner).await {
        Ok(items) => {
            info!(
                "History API: returning {} records for '{}'",
                items.len(),
                query.owner
            );
            Ok(list_response(&items))
        }
        Err(e) => {
            error!("History API: list failed: {}", e);
            Ok(error_from_utmka(&e))
        }
    }
}

/// 保存一条历史记录
pub async fn save_history(
    body: web::Json<SaveHistoryRequest>,
    service: web::Data<HistoryService>,
) -> ActixResult<impl Responder> {
    match service.add(&body.owner, &body.full_url).await {
        Ok(link) => {
            info!("History API: saved record {} for '{}'", link.id, link.owner);
            Ok(HttpResponse::Ok().json(json!({
                "success": true,
                "id": link.id,
            })))
        }
        Err(e) => {
            error!("History API: save failed: {}", e);
            Ok(error_from_utmka(&e))
        }
    }
}

/// 删除一条历史记录
pub async fn delete_history(
    path: web::Path<i64>,
    service: web::Data<HistoryService>,
) -> ActixResult<impl Responder> {
    let id = path.into_inner();

    match service.delete(id).await {
        Ok(true) => {
            info!("History API: deleted record {}", id);
            Ok(HttpResponse::Ok().json(json!({ "success": true })))
        }
        Ok(false) => Ok(not_found_response("History record", id)),
        Err(e) => {
            error!("History API: delete failed: {}", e);
            Ok(error_from_utmka(&e))
        }
    }
}

/// 更新历史记录的短链接
pub async fn update_short_url(
    path: web::Path<i64>,
    body: web::Json<ShortUrlRequest>,
    service: web::Data<HistoryService>,
) -> ActixResult<impl Responder> {
    let id = path.into_inner();
    let short_url = body.short_url.trim().to_string();

    match service.update_short_url(id, &short_url).await {
        Ok(true) => {
            info!("History API: short URL saved for record {}", id);
            Ok(HttpResponse::Ok().json(json!({
                "success": true,
                "short_url": short_url,
            })))
        }
        Ok(false) => Ok(not_found_response("History record", id)),
        Err(e) => {
            error!("History API: short URL update failed: {}", e);
            Ok(error_from_utmka(&e))
        }
    }
}
