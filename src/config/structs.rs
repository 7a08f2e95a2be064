//! 静态配置结构
//!
//! 启动时从 TOML 和环境变量加载一次，之后只读，改配置需要重启进程。

use serde::{Deserialize, Serialize};

/// 应用配置
///
/// - server: 监听地址、worker 数量、CORS
/// - database: 数据库连接
/// - history: 历史记录查询
/// - data: 数据目录（preferences.json 等）
/// - logging: 日志
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// 从默认位置（./config.toml）加载
    pub fn load() -> Self {
        Self::load_from("config.toml")
    }

    /// 从指定 TOML 文件加载，文件可以不存在
    ///
    /// 优先级 ENV > TOML > 默认值，ENV 形如 UTMKA__SERVER__PORT=9000。
    pub fn load_from(path: &str) -> Self {
        use config::{Config, Environment, File};

        let loaded = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix("UTMKA")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .and_then(|settings| settings.try_deserialize::<AppConfig>());

        match loaded {
            Ok(config) => {
                if std::path::Path::new(path).exists() {
                    eprintln!("[INFO] Configuration loaded from: {}", path);
                }
                config
            }
            Err(e) => {
                // 配置残缺时带默认值启动，错误只打到 stderr（日志还没初始化）
                eprintln!("[ERROR] Invalid configuration ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// 生成示例 TOML 配置
    pub fn generate_sample_config() -> String {
        toml::to_string_pretty(&Self::default())
            .unwrap_or_else(|e| format!("Error generating sample config: {}", e))
    }
}

/// HTTP 服务配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_cpu_count")]
    pub cpu_count: usize,
    /// 允许的跨域来源，`*` 表示任意来源
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cpu_count() -> usize {
    num_cpus::get()
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cpu_count: default_cpu_count(),
            cors_origins: default_cors_origins(),
        }
    }
}

/// 数据库配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub database_url: String,
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
    /// 连接与获取超时（秒）
    #[serde(default = "default_db_timeout")]
    pub timeout: u64,
}

fn default_database_url() -> String {
    "utmka.db".to_string()
}

fn default_pool_size() -> u32 {
    10
}

fn default_db_timeout() -> u64 {
    8
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            pool_size: default_pool_size(),
            timeout: default_db_timeout(),
        }
    }
}

/// 历史记录查询配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// 列表接口单次返回的最大记录数
    #[serde(default = "default_list_limit")]
    pub list_limit: u64,
}

fn default_list_limit() -> u64 {
    500
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            list_limit: default_list_limit(),
        }
    }
}

/// 数据目录配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// preferences.json 所在目录
    #[serde(default = "default_data_dir")]
    pub dir: String,
}

fn default_data_dir() -> String {
    ".".to_string()
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: default_data_dir(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// text 或 json
    #[serde(default = "default_log_format")]
    pub format: String,
    /// 留空输出到 stdout
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default = "default_enable_rotation")]
    pub enable_rotation: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_max_backups() -> u32 {
    5
}

fn default_enable_rotation() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
            max_backups: default_max_backups(),
            enable_rotation: default_enable_rotation(),
        }
    }
}
