//! HTTP API integration tests
//!
//! Tests for the /api routes end to end: handlers, services and a real
//! SQLite storage behind them.

use std::sync::{Arc, Once, OnceLock};

use actix_web::http::{StatusCode, header};
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use serde_json::{Value, json};
use tempfile::TempDir;

use utmka::api::AppStartTime;
use utmka::api::routes::{configure_routes, preferences_routes};
use utmka::config::init_config;
use utmka::preferences::PreferencesStore;
use utmka::services::{HistoryService, TemplateService};
use utmka::storage::backend::SeaOrmStorage;

// =============================================================================
// Test Setup
// =============================================================================

static INIT: Once = Once::new();
static TEST_DIR: OnceLock<TempDir> = OnceLock::new();
static STORAGE: OnceLock<Arc<SeaOrmStorage>> = OnceLock::new();
static HISTORY: OnceLock<Arc<HistoryService>> = OnceLock::new();
static TEMPLATES: OnceLock<Arc<TemplateService>> = OnceLock::new();
static PREFERENCES: OnceLock<Arc<PreferencesStore>> = OnceLock::new();
static ENV_INIT: tokio::sync::OnceCell<()> = tokio::sync::OnceCell::const_new();

fn init_static_config() {
    INIT.call_once(|| {
        init_config(None);
    });
}

/// 所有测试共享一个 SQLite 库，owner 按测试区分避免互相干扰
async fn init_test_env() {
    init_static_config();

    ENV_INIT
        .get_or_init(|| async {
            let temp_dir = TempDir::new().expect("Failed to create temp dir");
            let db_path = temp_dir.path().join("api_test.db");
            let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

            let storage = Arc::new(
                SeaOrmStorage::new(&db_url, "sqlite")
                    .await
                    .expect("Failed to create storage"),
            );

            let _ = HISTORY.set(Arc::new(HistoryService::new(storage.clone())));
            let _ = TEMPLATES.set(Arc::new(TemplateService::new(storage.clone())));
            let _ = PREFERENCES.set(Arc::new(PreferencesStore::new(temp_dir.path())));
            let _ = STORAGE.set(storage);
            let _ = TEST_DIR.set(temp_dir);
        })
        .await;
}

fn get_storage() -> Arc<SeaOrmStorage> {
    STORAGE.get().expect("Storage not initialized").clone()
}

/// Create a test app with the full route tree
macro_rules! api_app {
    () => {{
        test::init_service(
            App::new()
                .app_data(web::Data::new(get_storage()))
                .app_data(web::Data::from(
                    HISTORY.get().expect("Service not initialized").clone(),
                ))
                .app_data(web::Data::from(
                    TEMPLATES.get().expect("Service not initialized").clone(),
                ))
                .app_data(web::Data::from(
                    PREFERENCES.get().expect("Store not initialized").clone(),
                ))
                .app_data(web::Data::new(AppStartTime {
                    start_datetime: chrono::Utc::now(),
                }))
                .configure(configure_routes),
        )
        .await
    }};
}

/// POST a history record and return its id
macro_rules! save_history {
    ($app:expr, $owner:expr, $url:expr) => {{
        let req = TestRequest::post()
            .uri("/api/history")
            .set_json(json!({ "owner": $owner, "full_url": $url }))
            .to_request();
        let resp = test::call_service($app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], true);
        body["id"].as_i64().expect("id should be a number")
    }};
}

// =============================================================================
// History Tests
// =============================================================================

#[tokio::test]
async fn test_list_history_without_owner_returns_empty() {
    init_test_env().await;
    let app = api_app!();

    let req = TestRequest::get().uri("/api/history").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_save_and_list_history() {
    init_test_env().await;
    let app = api_app!();

    let id = save_history!(
        &app,
        "roundtrip@x.com",
        "example.com/page?utm_source=vk&utm_medium=social"
    );
    assert!(id > 0);

    let req = TestRequest::get()
        .uri("/api/history?owner=roundtrip@x.com")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::CACHE_CONTROL).unwrap(),
        "no-cache"
    );

    let body: Value = test::read_body_json(resp).await;
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);

    // URL 字段全部由服务端推导
    assert_eq!(rows[0]["owner"], "roundtrip@x.com");
    assert_eq!(
        rows[0]["full_url"],
        "https://example.com/page?utm_source=vk&utm_medium=social"
    );
    assert_eq!(rows[0]["base_url"], "https://example.com/page");
    assert_eq!(rows[0]["utm_source"], "vk");
    assert_eq!(rows[0]["utm_medium"], "social");
    assert_eq!(rows[0]["utm_campaign"], Value::Null);
    assert_eq!(rows[0]["short_url"], Value::Null);
}

#[tokio::test]
async fn test_save_history_accepts_legacy_keys() {
    init_test_env().await;
    let app = api_app!();

    let req = TestRequest::post()
        .uri("/api/history")
        .set_json(json!({
            "user_email": "legacy@x.com",
            "url": "https://example.com/p?utm_source=tg",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);

    let req = TestRequest::get()
        .uri("/api/history?user_email=legacy@x.com")
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_save_history_missing_url_fails() {
    init_test_env().await;
    let app = api_app!();

    let req = TestRequest::post()
        .uri("/api/history")
        .set_json(json!({ "owner": "novalid@x.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], 1000);
    assert_eq!(body["error"], "full_url is required");
}

#[tokio::test]
async fn test_save_history_missing_owner_fails() {
    init_test_env().await;
    let app = api_app!();

    let req = TestRequest::post()
        .uri("/api/history")
        .set_json(json!({ "full_url": "https://example.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "owner is required");
}

#[tokio::test]
async fn test_delete_history() {
    init_test_env().await;
    let app = api_app!();

    let id = save_history!(&app, "delete@x.com", "https://example.com/1");

    let req = TestRequest::delete()
        .uri(&format!("/api/history/{}", id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "success": true }));

    // 已删除的 id 再删返回 404
    let req = TestRequest::delete()
        .uri(&format!("/api/history/{}", id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], 1004);
}

#[tokio::test]
async fn test_update_short_url() {
    init_test_env().await;
    let app = api_app!();

    let id = save_history!(&app, "shorturl@x.com", "https://example.com/1");

    let req = TestRequest::put()
        .uri(&format!("/api/history/{}/short_url", id))
        .set_json(json!({ "short_url": "  https://s.io/abc  " }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["short_url"], "https://s.io/abc");

    let req = TestRequest::get()
        .uri("/api/history?owner=shorturl@x.com")
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body[0]["short_url"], "https://s.io/abc");
}

#[tokio::test]
async fn test_update_short_url_empty_fails() {
    init_test_env().await;
    let app = api_app!();

    let id = save_history!(&app, "shortempty@x.com", "https://example.com/1");

    let req = TestRequest::put()
        .uri(&format!("/api/history/{}/short_url", id))
        .set_json(json!({ "short_url": "   " }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "short_url is required");
}

#[tokio::test]
async fn test_update_short_url_unknown_id() {
    init_test_env().await;
    let app = api_app!();

    let req = TestRequest::put()
        .uri("/api/history/9999999/short_url")
        .set_json(json!({ "short_url": "https://s.io/abc" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Template Tests
// =============================================================================

#[tokio::test]
async fn test_add_single_template_object() {
    init_test_env().await;
    let app = api_app!();

    let req = TestRequest::post()
        .uri("/api/templates")
        .set_json(json!({
            "owner": "tpl-single@x.com",
            "name": "VK Spring",
            "utm_source": "vk",
            "utm_medium": "social",
            "tag_name": "Spring",
            "tag_color": "#ff8800",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["imported_count"], 1);
    assert_eq!(body["failed_count"], 0);

    let req = TestRequest::get()
        .uri("/api/templates?owner=tpl-single@x.com")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(
        resp.headers().get(header::CACHE_CONTROL).unwrap(),
        "no-cache"
    );
    let body: Value = test::read_body_json(resp).await;
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["name"], "VK Spring");
    assert_eq!(rows[0]["tag_color"], "#ff8800");
}

#[tokio::test]
async fn test_add_templates_array_partial_failure() {
    init_test_env().await;
    let app = api_app!();

    let req = TestRequest::post()
        .uri("/api/templates")
        .set_json(json!([
            { "owner": "tpl-batch@x.com", "name": "One", "utm_source": "vk" },
            { "owner": "tpl-batch@x.com", "utm_source": "no-name" },
            { "owner": "tpl-batch@x.com", "name": "Three" },
        ]))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["imported_count"], 2);
    assert_eq!(body["failed_count"], 1);
    assert_eq!(body["errors"][0]["row"], 2);

    let req = TestRequest::get()
        .uri("/api/templates?owner=tpl-batch@x.com")
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_add_templates_rejects_scalar_body() {
    init_test_env().await;
    let app = api_app!();

    let req = TestRequest::post()
        .uri("/api/templates")
        .set_json(json!(5))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_template_unknown_id() {
    init_test_env().await;
    let app = api_app!();

    let req = TestRequest::delete()
        .uri("/api/templates/9999999")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Export Tests
// =============================================================================

#[tokio::test]
async fn test_export_history_json() {
    init_test_env().await;
    let app = api_app!();

    save_history!(&app, "exp-json@x.com", "https://example.com/a?utm_source=one");
    save_history!(&app, "exp-json@x.com", "https://example.com/b?utm_source=two");

    let req = TestRequest::post()
        .uri("/api/export/history")
        .set_json(json!({ "owner": "exp-json@x.com", "format": "json" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let disposition = resp
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.contains("attachment"));
    assert!(disposition.contains("utm_history_exp-json_x.com.json"));

    let text = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    let rows: Value = serde_json::from_str(&text).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 2);

    // 导出行不携带 owner/id/created_at
    assert!(rows[0].get("owner").is_none());
    assert!(rows[0].get("id").is_none());
    assert!(rows[0].get("created_at").is_none());
    assert!(rows[0].get("full_url").is_some());
}

#[tokio::test]
async fn test_export_history_csv() {
    init_test_env().await;
    let app = api_app!();

    save_history!(&app, "exp-csv@x.com", "https://example.com/a?utm_source=one");

    let req = TestRequest::post()
        .uri("/api/export/history")
        .set_json(json!({ "owner": "exp-csv@x.com", "format": "csv" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/csv; charset=utf-8"
    );

    let text = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    let mut lines = text.lines();
    assert!(lines.next().unwrap().starts_with("base_url,full_url"));
    assert!(lines.next().unwrap().contains("utm_source=one"));
    assert!(lines.next().is_none());
}

#[tokio::test]
async fn test_export_unknown_format_fails() {
    init_test_env().await;
    let app = api_app!();

    let req = TestRequest::post()
        .uri("/api/export/history")
        .set_json(json!({ "owner": "exp-bad@x.com", "format": "xml" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Invalid format: xml");
}

#[tokio::test]
async fn test_export_missing_owner_fails() {
    init_test_env().await;
    let app = api_app!();

    let req = TestRequest::post()
        .uri("/api/export/history")
        .set_json(json!({ "format": "json" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "owner is required");
}

#[tokio::test]
async fn test_export_templates_json() {
    init_test_env().await;
    let app = api_app!();

    let req = TestRequest::post()
        .uri("/api/templates")
        .set_json(json!({ "owner": "exp-tpl@x.com", "name": "Newsletter", "utm_source": "email" }))
        .to_request();
    test::call_service(&app, req).await;

    let req = TestRequest::post()
        .uri("/api/export/templates")
        .set_json(json!({ "owner": "exp-tpl@x.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let disposition = resp
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    // format 省略时默认 json
    assert!(disposition.contains("utm_templates_exp-tpl_x.com.json"));

    let text = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    let rows: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(rows[0]["name"], "Newsletter");
    assert!(rows[0].get("owner").is_none());
}

// =============================================================================
// Import Tests
// =============================================================================

#[tokio::test]
async fn test_import_history_array_with_bad_row() {
    init_test_env().await;
    let app = api_app!();

    let req = TestRequest::post()
        .uri("/api/import/history")
        .set_json(json!([
            { "owner": "imp@x.com", "full_url": "https://example.com/1?utm_source=a" },
            { "owner": "imp@x.com" },
            { "owner": "imp@x.com", "full_url": "https://example.com/3?utm_source=c" },
        ]))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["imported_count"], 2);
    assert_eq!(body["failed_count"], 1);
    assert_eq!(body["errors"][0]["row"], 2);
    assert_eq!(body["errors"][0]["message"], "full_url is required");

    // 失败行不回滚其他行
    let req = TestRequest::get()
        .uri("/api/history?owner=imp@x.com")
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_import_history_single_object() {
    init_test_env().await;
    let app = api_app!();

    let req = TestRequest::post()
        .uri("/api/import/history")
        .set_json(json!({
            "user_email": "imp-single@x.com",
            "url": "https://example.com/legacy?utm_source=old",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["imported_count"], 1);
}

#[tokio::test]
async fn test_import_history_derives_base_url() {
    init_test_env().await;
    let app = api_app!();

    let req = TestRequest::post()
        .uri("/api/import/history")
        .set_json(json!([{
            "owner": "imp-base@x.com",
            "full_url": "https://shop.example/p?utm_source=from-url",
            "utm_source": "provided",
        }]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = TestRequest::get()
        .uri("/api/history?owner=imp-base@x.com")
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;

    // base_url 缺省时由 full_url 推导；UTM 字段按行内提供的值存储
    assert_eq!(body[0]["base_url"], "https://shop.example/p");
    assert_eq!(body[0]["utm_source"], "provided");
}

#[tokio::test]
async fn test_import_history_preserves_short_url_and_tags() {
    init_test_env().await;
    let app = api_app!();

    let req = TestRequest::post()
        .uri("/api/import/history")
        .set_json(json!([{
            "owner": "imp-tags@x.com",
            "full_url": "https://example.com/p",
            "short_url": "https://s.io/xyz",
            "tag_name": "Promo",
            "tag_color": "#00ff00",
        }]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = TestRequest::get()
        .uri("/api/history?owner=imp-tags@x.com")
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body[0]["short_url"], "https://s.io/xyz");
    assert_eq!(body[0]["tag_name"], "Promo");
    assert_eq!(body[0]["tag_color"], "#00ff00");
}

// =============================================================================
// System Tests
// =============================================================================

#[tokio::test]
async fn test_version_endpoint() {
    init_test_env().await;
    let app = api_app!();

    let req = TestRequest::get().uri("/api/version").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_health_endpoint() {
    init_test_env().await;
    let app = api_app!();

    let req = TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["checks"]["storage"]["status"], "healthy");
    assert_eq!(body["checks"]["storage"]["backend"], "sqlite");
    assert!(body["uptime"].as_u64().is_some());
}

// =============================================================================
// Preferences Tests（独立实例，避免共享文件的并发干扰）
// =============================================================================

#[actix_rt::test]
async fn test_preferences_defaults() {
    let temp = TempDir::new().unwrap();
    let store = Arc::new(PreferencesStore::new(temp.path()));
    let app = test::init_service(
        App::new()
            .app_data(web::Data::from(store))
            .service(web::scope("/api").service(preferences_routes())),
    )
    .await;

    let req = TestRequest::get().uri("/api/preferences").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["theme"], "dark");
    assert_eq!(body["lang"], "ru");
    assert_eq!(body["onboarding_done"], false);
}

#[actix_rt::test]
async fn test_preferences_partial_update_merges() {
    let temp = TempDir::new().unwrap();
    let store = Arc::new(PreferencesStore::new(temp.path()));
    let app = test::init_service(
        App::new()
            .app_data(web::Data::from(store))
            .service(web::scope("/api").service(preferences_routes())),
    )
    .await;

    let req = TestRequest::post()
        .uri("/api/preferences")
        .set_json(json!({ "theme": "light" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["theme"], "light");
    assert_eq!(body["lang"], "ru");

    let req = TestRequest::post()
        .uri("/api/preferences")
        .set_json(json!({ "lang": "en", "onboarding_done": true }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["theme"], "light");
    assert_eq!(body["lang"], "en");
    assert_eq!(body["onboarding_done"], true);

    // GET 返回落盘后的合并结果
    let req = TestRequest::get().uri("/api/preferences").to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["theme"], "light");
    assert_eq!(body["onboarding_done"], true);
}
