//! UTM 参数模块
//!
//! 纯函数实现 UTM 链接的构建与解析。
//! 所有函数都不会失败：无法解析的输入会原样返回或降级为空参数。

use url::Url;

/// 五个标准 UTM 查询参数名（顺序即构建时的追加顺序）
pub const UTM_KEYS: [&str; 5] = [
    "utm_source",
    "utm_medium",
    "utm_campaign",
    "utm_content",
    "utm_term",
];

/// 一组 UTM 参数值，每个字段独立可空
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UtmParams {
    pub source: Option<String>,
    pub medium: Option<String>,
    pub campaign: Option<String>,
    pub content: Option<String>,
    pub term: Option<String>,
}

impl UtmParams {
    /// 是否五个字段全为空
    pub fn is_empty(&self) -> bool {
        self.source.is_none()
            && self.medium.is_none()
            && self.campaign.is_none()
            && self.content.is_none()
            && self.term.is_none()
    }

    /// 按 UTM_KEYS 顺序返回 (key, value) 对
    pub fn entries(&self) -> [(&'static str, Option<&str>); 5] {
        [
            ("utm_source", self.source.as_deref()),
            ("utm_medium", self.medium.as_deref()),
            ("utm_campaign", self.campaign.as_deref()),
            ("utm_content", self.content.as_deref()),
            ("utm_term", self.term.as_deref()),
        ]
    }

    fn set(&mut self, key: &str, value: String) {
        match key {
            "utm_source" => self.source = Some(value),
            "utm_medium" => self.medium = Some(value),
            "utm_campaign" => self.campaign = Some(value),
            "utm_content" => self.content = Some(value),
            "utm_term" => self.term = Some(value),
            _ => {}
        }
    }

    fn is_set(&self, key: &str) -> bool {
        match key {
            "utm_source" => self.source.is_some(),
            "utm_medium" => self.medium.is_some(),
            "utm_campaign" => self.campaign.is_some(),
            "utm_content" => self.content.is_some(),
            "utm_term" => self.term.is_some(),
            _ => false,
        }
    }
}

/// 缺省协议补全：没有 http:// 或 https:// 前缀时按 https:// 处理
fn ensure_scheme(url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    }
}

/// 构建带 UTM 参数的完整链接
///
/// 基础链接已有的查询参数全部保留；非空（去除首尾空白后）的 UTM 值
/// 覆盖同名参数，键已存在时保持原位置，新键按 UTM_KEYS 顺序追加到末尾。
/// 空值或纯空白的 UTM 字段不写入。对同样的参数重复调用结果不变。
///
/// 无法解析的输入原样返回。
pub fn build_utm_url(base_url: &str, params: &UtmParams) -> String {
    let working = ensure_scheme(base_url);

    let mut url = match Url::parse(&working) {
        Ok(url) => url,
        Err(_) => return base_url.to_string(),
    };

    // 现有查询参数（含重复键，保持出现顺序）
    let mut pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    for (key, value) in params.entries() {
        let Some(value) = value else { continue };
        let trimmed = value.trim();
        if trimmed.is_empty() {
            continue;
        }

        // 键已存在：首个出现位置替换值，后续重复项丢弃；否则追加到末尾
        let mut replaced = false;
        pairs = pairs
            .into_iter()
            .filter_map(|(k, v)| {
                if k == key {
                    if replaced {
                        None
                    } else {
                        replaced = true;
                        Some((k, trimmed.to_string()))
                    }
                } else {
                    Some((k, v))
                }
            })
            .collect();
        if !replaced {
            pairs.push((key.to_string(), trimmed.to_string()));
        }
    }

    if pairs.is_empty() {
        url.set_query(None);
    } else {
        let mut serializer = url.query_pairs_mut();
        serializer.clear();
        for (k, v) in &pairs {
            serializer.append_pair(k, v);
        }
        drop(serializer);
    }

    url.to_string()
}

/// 从链接中提取五个 UTM 参数
///
/// 每个键取第一次出现的非空值，缺失为 None。
/// 任何解析失败都降级为全 None，不会报错。
pub fn parse_utm_params(url: &str) -> UtmParams {
    let parsed = Url::parse(url).or_else(|_| Url::parse(&ensure_scheme(url)));

    let Ok(parsed) = parsed else {
        return UtmParams::default();
    };

    let mut params = UtmParams::default();
    for (key, value) in parsed.query_pairs() {
        if value.is_empty() || params.is_set(&key) {
            continue;
        }
        if UTM_KEYS.contains(&key.as_ref()) {
            params.set(&key, value.into_owned());
        }
    }
    params
}

/// 去掉查询串和锚点，返回基础链接（缺省协议补全为 https://）
///
/// 无法解析时退化为截断第一个 ? 之前的部分。
pub fn extract_base_url(url: &str) -> String {
    let working = ensure_scheme(url);

    match Url::parse(&working) {
        Ok(mut parsed) => {
            parsed.set_query(None);
            parsed.set_fragment(None);
            parsed.to_string()
        }
        Err(_) => match url.split_once('?') {
            Some((head, _)) => head.to_string(),
            None => url.to_string(),
        },
    }
}

/// 规范化链接：补全协议并按标准形式重新编码
///
/// 服务层入库前调用，保证 full_url 与 base_url 的前缀关系成立。
/// 无法解析的输入原样返回。
pub fn normalize_url(url: &str) -> String {
    let working = ensure_scheme(url);
    match Url::parse(&working) {
        Ok(parsed) => parsed.to_string(),
        Err(_) => url.to_string(),
    }
}
