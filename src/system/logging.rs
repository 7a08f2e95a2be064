//! Tracing subscriber setup
//!
//! 根据配置初始化全局日志：stdout 或文件输出，text 或 JSON 格式。

use std::io;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::EnvFilter;

use crate::config::{AppConfig, LoggingConfig};

/// 根据日志配置构建写入端，返回 (writer, 是否启用 ANSI 颜色)
fn build_writer(logging: &LoggingConfig) -> (Box<dyn io::Write + Send + Sync>, bool) {
    let file = logging.file.as_deref().unwrap_or("");
    if file.is_empty() {
        return (Box::new(io::stdout()), true);
    }

    if logging.enable_rotation {
        let path = Path::new(file);
        let dir = path.parent().unwrap_or(Path::new("."));
        let prefix = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("utmka.log")
            .trim_end_matches(".log");
        let appender = rolling::Builder::new()
            .rotation(rolling::Rotation::DAILY)
            .filename_prefix(prefix)
            .filename_suffix("log")
            .max_log_files(logging.max_backups as usize)
            .build(dir)
            .expect("Failed to create rolling log appender");
        (Box::new(appender), false)
    } else {
        let handle = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(file)
            .expect("Failed to open log file");
        (Box::new(handle), false)
    }
}

/// 初始化全局 tracing subscriber
///
/// 返回的 guard 必须存活到进程结束，否则缓冲中的日志会丢失。
/// 只能在启动时调用一次。
pub fn init_logging(config: &AppConfig) -> WorkerGuard {
    let (writer, ansi) = build_writer(&config.logging);
    let (non_blocking, guard) = tracing_appender::non_blocking(writer);

    // 无法解析的 level 字符串退回 info
    let filter =
        EnvFilter::try_new(&config.logging.level).unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(filter)
        .with_level(true)
        .with_ansi(ansi);

    match config.logging.format.as_str() {
        "json" => builder.json().init(),
        _ => builder.init(),
    }

    guard
}
