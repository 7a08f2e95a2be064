//! API 路由配置
//!
//! 将 /api 下的路由按功能模块拆分，提高可读性和可维护性。

use actix_web::web;

use super::export_import::{export_history, export_templates, import_history};
use super::history::{delete_history, list_history, save_history, update_short_url};
use super::preferences::{get_preferences, set_preferences};
use super::system;
use super::templates::{add_templates, delete_template, list_templates};

/// 历史记录路由 `/history`
///
/// 包含：
/// - GET /history - 按 owner 获取历史记录
/// - POST /history - 保存一条历史记录
/// - DELETE /history/{id} - 删除历史记录
/// - PUT /history/{id}/short_url - 保存短链接
pub fn history_routes() -> actix_web::Scope {
    web::scope("/history")
        .route("", web::get().to(list_history))
        .route("", web::post().to(save_history))
        // /{id}/short_url must be before /{id}
        .route("/{id}/short_url", web::put().to(update_short_url))
        .route("/{id}", web::delete().to(delete_history))
}

/// 模板路由 `/templates`
///
/// 包含：
/// - GET /templates - 按 owner 获取模板
/// - POST /templates - 保存模板（单条或数组）
/// - DELETE /templates/{id} - 删除模板
pub fn template_routes() -> actix_web::Scope {
    web::scope("/templates")
        .route("", web::get().to(list_templates))
        .route("", web::post().to(add_templates))
        .route("/{id}", web::delete().to(delete_template))
}

/// 导出路由 `/export`
pub fn export_routes() -> actix_web::Scope {
    web::scope("/export")
        .route("/history", web::post().to(export_history))
        .route("/templates", web::post().to(export_templates))
}

/// 导入路由 `/import`
pub fn import_routes() -> actix_web::Scope {
    web::scope("/import").route("/history", web::post().to(import_history))
}

/// 偏好设置路由 `/preferences`
pub fn preferences_routes() -> actix_web::Scope {
    web::scope("/preferences")
        .route("", web::get().to(get_preferences))
        .route("", web::post().to(set_preferences))
}

/// API 路由
///
/// 组合所有子模块路由
pub fn api_scope() -> actix_web::Scope {
    web::scope("/api")
        .service(history_routes())
        .service(template_routes())
        .service(export_routes())
        .service(import_routes())
        .service(preferences_routes())
        .route("/version", web::get().to(system::version))
}

/// 注册全部 HTTP 路由（API scope + 根级健康检查）
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(api_scope())
        .route("/health", web::get().to(system::health))
        .route("/health", web::head().to(system::health));
}
