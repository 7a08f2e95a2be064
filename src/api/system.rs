//! Version and health endpoints

use std::sync::Arc;
use std::time::{Duration, Instant};

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, Result as ActixResult, web};
use serde::Serialize;
use serde_json::json;
use tracing::{error, info, trace};

use super::error_code::ErrorCode;
use crate::storage::SeaOrmStorage;

// 应用启动时间结构体
#[derive(Clone, Debug)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize)]
struct HealthStorageCheck {
    status: String,
    backend: String,
    history_count: Option<u64>,
    error: Option<String>,
}

/// 返回服务版本号
pub async fn version() -> ActixResult<impl Responder> {
    trace!("Received version request");
    Ok(HttpResponse::Ok().json(json!({ "version": env!("CARGO_PKG_VERSION") })))
}

/// 健康检查（只查 count，不加载全表）
pub async fn health(
    storage: web::Data<Arc<SeaOrmStorage>>,
    app_start_time: web::Data<AppStartTime>,
) -> ActixResult<impl Responder> {
    let start_time = Instant::now();
    trace!("Received health check request");

    let backend = storage.backend_name().to_string();
    let storage_check =
        match tokio::time::timeout(Duration::from_secs(5), storage.count_history()).await {
            Ok(Ok(count)) => {
                trace!("Storage health check passed, {} records found", count);
                HealthStorageCheck {
                    status: "healthy".to_string(),
                    backend,
                    history_count: Some(count),
                    error: None,
                }
            }
            Ok(Err(e)) => {
                error!("Storage health check failed: {}", e);
                HealthStorageCheck {
                    status: "unhealthy".to_string(),
                    backend,
                    history_count: None,
                    error: Some(format!("database error: {}", e)),
                }
            }
            Err(_) => {
                error!("Storage health check timeout");
                HealthStorageCheck {
                    status: "unhealthy".to_string(),
                    backend,
                    history_count: None,
                    error: Some("timeout".to_string()),
                }
            }
        };

    let now = chrono::Utc::now();
    let uptime_seconds = (now - app_start_time.start_datetime).num_seconds().max(0) as u64;
    let is_healthy = storage_check.status == "healthy";

    let response_status = if is_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let body = json!({
        "status": if is_healthy { "healthy" } else { "unhealthy" },
        "code": if is_healthy { ErrorCode::Success } else { ErrorCode::ServiceUnavailable },
        "timestamp": now.to_rfc3339(),
        "uptime": uptime_seconds,
        "checks": { "storage": storage_check },
        "response_time_ms": start_time.elapsed().as_millis() as u64,
    });

    info!(
        "Health check completed in {:?}, status: {}",
        start_time.elapsed(),
        if is_healthy { "healthy" } else { "unhealthy" }
    );

    Ok(HttpResponse::build(response_status)
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(body))
}
