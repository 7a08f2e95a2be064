use serde::{Deserialize, Serialize};

/// 一条已保存的 UTM 历史记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UtmLink {
    pub id: i64,
    pub owner: String,
    pub base_url: String,
    pub full_url: String,
    pub utm_source: Option<String>,
    pub utm_medium: Option<String>,
    pub utm_campaign: Option<String>,
    pub utm_content: Option<String>,
    pub utm_term: Option<String>,
    pub short_url: Option<String>,
    pub tag_name: Option<String>,
    pub tag_color: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// 待插入的历史记录（id 与 created_at 由存储层分配）
#[derive(Debug, Clone, Default)]
pub struct NewUtmLink {
    pub owner: String,
    pub base_url: String,
    pub full_url: String,
    pub utm_source: Option<String>,
    pub utm_medium: Option<String>,
    pub utm_campaign: Option<String>,
    pub utm_content: Option<String>,
    pub utm_term: Option<String>,
    pub short_url: Option<String>,
    pub tag_name: Option<String>,
    pub tag_color: Option<String>,
}

/// 一条已保存的 UTM 参数模板
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: i64,
    pub owner: String,
    pub name: String,
    pub utm_source: Option<String>,
    pub utm_medium: Option<String>,
    pub utm_campaign: Option<String>,
    pub utm_content: Option<String>,
    pub utm_term: Option<String>,
    pub tag_name: Option<String>,
    pub tag_color: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// 待插入的模板
#[derive(Debug, Clone, Default)]
pub struct NewTemplate {
    pub owner: String,
    pub name: String,
    pub utm_source: Option<String>,
    pub utm_medium: Option<String>,
    pub utm_campaign: Option<String>,
    pub utm_content: Option<String>,
    pub utm_term: Option<String>,
    pub tag_name: Option<String>,
    pub tag_color: Option<String>,
}
