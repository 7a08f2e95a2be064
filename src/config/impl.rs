use std::sync::{Arc, OnceLock};

use arc_swap::ArcSwap;

use super::AppConfig;

static CONFIG: OnceLock<ArcSwap<AppConfig>> = OnceLock::new();

/// 取全局配置
///
/// 返回的 Arc 随手 clone，不持任何锁。
pub fn get_config() -> Arc<AppConfig> {
    CONFIG
        .get()
        .expect("Config not initialized. Call init_config() first.")
        .load_full()
}

/// 初始化全局配置，进程内只生效一次
///
/// `path` 为 None 时读当前目录的 config.toml；文件不存在则用默认值
/// 加环境变量覆盖。
///
/// # Examples
/// ```no_run
/// use utmka::config::init_config;
/// init_config(None);
/// ```
pub fn init_config(path: Option<&str>) {
    CONFIG.get_or_init(|| {
        let config = match path {
            Some(p) => AppConfig::load_from(p),
            None => AppConfig::load(),
        };
        ArcSwap::from_pointee(config)
    });
}
