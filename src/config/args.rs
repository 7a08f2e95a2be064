//! 命令行参数解析
//!
//! 在配置和日志初始化之前运行，所以不依赖任何全局状态，只做最小的手工扫描。

/// 从命令行参数中取配置文件路径
///
/// 支持 `-c path`、`--config path`、`-c=path`、`--config=path`。
///
/// # Examples
/// ```
/// use utmka::config::args::parse_config_path;
/// let args = vec!["utmka".to_string(), "-c".to_string(), "custom.toml".to_string()];
/// assert_eq!(parse_config_path(&args), Some("custom.toml".to_string()));
/// ```
pub fn parse_config_path(args: &[String]) -> Option<String> {
    let mut rest = args.iter().skip(1);
    while let Some(arg) = rest.next() {
        if arg == "-c" || arg == "--config" {
            return rest.next().cloned();
        }
        if let Some(path) = arg
            .strip_prefix("-c=")
            .or_else(|| arg.strip_prefix("--config="))
        {
            return Some(path.to_string());
        }
    }
    None
}

/// 参数列表中是否出现某个开关
///
/// `short` 为空字符串时只匹配长形式。
pub fn has_flag(args: &[String], short: &str, long: &str) -> bool {
    args.iter()
        .skip(1)
        .any(|arg| (!short.is_empty() && arg == short) || arg == long)
}
