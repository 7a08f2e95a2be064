//! API 请求 DTO
//!
//! 兼容旧版 host shell 的键名（user_email / url）通过 serde alias 接收。

use serde::Deserialize;

/// 列表接口的 owner 查询参数
#[derive(Debug, Deserialize)]
pub struct OwnerQuery {
    #[serde(default, alias = "user_email")]
    pub owner: String,
}

/// POST /api/history 请求体
///
/// URL 相关字段由服务端从 full_url 推导，请求中的其他字段被忽略。
#[derive(Debug, Deserialize)]
pub struct SaveHistoryRequest {
    #[serde(default, alias = "user_email")]
    pub owner: String,
    #[serde(default, alias = "url")]
    pub full_url: String,
}

/// PUT /api/history/{id}/short_url 请求体
#[derive(Debug, Deserialize)]
pub struct ShortUrlRequest {
    #[serde(default)]
    pub short_url: String,
}

/// 导出请求体，format 省略时默认 json
#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    #[serde(default, alias = "user_email")]
    pub owner: String,
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "json".to_string()
}
