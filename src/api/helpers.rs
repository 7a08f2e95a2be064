//! API 帮助函数

use actix_web::HttpResponse;
use serde::Serialize;
use serde_json::json;

use super::error_code::ErrorCode;
use crate::errors::UtmkaError;

/// 构建列表响应（携带 Cache-Control: no-cache）
pub fn list_response<T: Serialize>(items: &[T]) -> HttpResponse {
    HttpResponse::Ok()
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .append_header(("Cache-Control", "no-cache"))
        .json(items)
}

/// 从 UtmkaError 构建错误响应（自动映射 HTTP 状态码和 ErrorCode）
pub fn error_from_utmka(err: &UtmkaError) -> HttpResponse {
    let status = err.http_status();
    let code = ErrorCode::from(err);

    HttpResponse::build(status)
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(json!({
            "success": false,
            "error": err.message(),
            "code": code,
        }))
}

/// 未知 id 的统一 404 响应
pub fn not_found_response(kind: &str, id: i64) -> HttpResponse {
    error_from_utmka(&UtmkaError::not_found(format!("{} {} not found", kind, id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_error_from_validation_is_bad_request() {
        let response = error_from_utmka(&UtmkaError::validation("owner is required"));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_error_from_not_found() {
        let response = error_from_utmka(&UtmkaError::not_found("record 42 not found"));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_error_from_database_operation_is_internal() {
        let response = error_from_utmka(&UtmkaError::database_operation("statement failed"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_not_found_response() {
        let response = not_found_response("History record", 42);
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_list_response_ok() {
        let response = list_response(&["a", "b"]);
        assert_eq!(response.status(), StatusCode::OK);
        let cache_control = response.headers().get("Cache-Control").unwrap();
        assert_eq!(cache_control, "no-cache");
    }
}
