//! HTTP server mode
//!
//! 组装中间件和路由并运行 actix-web 服务，直到收到关闭信号。

use std::time::Duration;

use actix_cors::Cors;
use actix_web::middleware::{Compress, DefaultHeaders};
use actix_web::{App, HttpServer, web};
use anyhow::Result;
use tracing::{error, warn};

use crate::api::AppStartTime;
use crate::api::routes::configure_routes;
use crate::runtime::{shutdown, startup};

/// 启动时校验一次 CORS 配置
fn validate_cors_config(origins: &[String]) {
    if origins.is_empty() {
        warn!(
            "cors_origins is empty. No cross-origin requests will be allowed. \
            Set cors_origins explicitly or use '[\"*\"]' for any origin."
        );
    }
}

/// 按配置构建 CORS 中间件
fn build_cors_middleware(origins: &[String]) -> Cors {
    // 空列表退回浏览器默认的同源策略
    if origins.is_empty() {
        return Cors::default();
    }

    if origins.iter().any(|o| o == "*") {
        return Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);
    }

    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
        .allowed_headers(vec!["Content-Type", "Accept"])
        .max_age(3600);
    for origin in origins {
        cors = cors.allowed_origin(origin);
    }
    cors
}

/// 运行 HTTP 服务器直到退出
///
/// 先通过 [`startup::prepare_server_startup`] 建好存储和服务层，
/// 再把它们交给 worker 闭包。日志必须在调用前初始化。
pub async fn run_server() -> Result<()> {
    let app_start_time = AppStartTime {
        start_datetime: chrono::Utc::now(),
    };

    let startup = startup::prepare_server_startup().await.map_err(|e| {
        error!("Server startup failed: {}", e);
        e
    })?;

    let storage = startup.storage.clone();
    let history_service = startup.history_service.clone();
    let template_service = startup.template_service.clone();
    let preferences_store = startup.preferences_store.clone();

    let config = crate::config::get_config();
    let bind_address = format!("{}:{}", config.server.host, config.server.port);

    let cpu_count = config.server.cpu_count.min(32);
    warn!("Using {} CPU cores for the server", cpu_count);

    let cors_origins = config.server.cors_origins.clone();
    validate_cors_config(&cors_origins);

    // storage 移进 worker 闭包之前留一份连接句柄给关闭流程
    let db_for_shutdown = storage.get_db().clone();

    let server = HttpServer::new(move || {
        let cors = build_cors_middleware(&cors_origins);

        App::new()
            .wrap(cors)
            .wrap(Compress::default())
            .app_data(web::Data::new(storage.clone()))
            .app_data(web::Data::from(history_service.clone()))
            .app_data(web::Data::from(template_service.clone()))
            .app_data(web::Data::from(preferences_store.clone()))
            .app_data(web::Data::new(app_start_time.clone()))
            .app_data(web::PayloadConfig::new(1024 * 1024))
            .wrap(
                DefaultHeaders::new()
                    .add(("Connection", "keep-alive"))
                    .add(("Keep-Alive", "timeout=30, max=1000"))
                    .add(("Cache-Control", "no-cache, no-store, must-revalidate")),
            )
            .configure(configure_routes)
    })
    .keep_alive(Duration::from_secs(30))
    .client_request_timeout(Duration::from_millis(5000))
    .client_disconnect_timeout(Duration::from_millis(1000))
    .workers(cpu_count);

    warn!("Starting server at http://{}", bind_address);
    let server = server.bind(bind_address)?.run();

    tokio::select! {
        res = server => {
            res?;
        }
        _ = shutdown::listen_for_shutdown(&db_for_shutdown) => {
            warn!("Graceful shutdown: all tasks completed");
        }
    }

    Ok(())
}
