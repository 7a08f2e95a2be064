use std::env;

use utmka::config::args::{has_flag, parse_config_path};
use utmka::config::{AppConfig, get_config, init_config};
use utmka::errors::UtmkaError;
use utmka::runtime::run_server;
use utmka::system::init_logging;

const USAGE: &str = "\
utmka - UTM link builder backend

Usage: utmka [OPTIONS]

Options:
  -c, --config <PATH>    Path to TOML config file (default: config.toml)
      --generate-config  Print a sample config file and exit
  -v, --version          Print version and exit
  -h, --help             Print this help and exit
";

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();

    if has_flag(&args, "-v", "--version") {
        println!("utmka {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    if has_flag(&args, "-h", "--help") {
        print!("{}", USAGE);
        return Ok(());
    }

    if has_flag(&args, "", "--generate-config") {
        print!("{}", AppConfig::generate_sample_config());
        return Ok(());
    }

    dotenvy::dotenv().ok();

    // 初始化配置（ENV > TOML > 默认值）
    init_config(parse_config_path(&args).as_deref());
    let config = get_config();

    // 初始化日志（guard 必须存活到进程结束）
    let _guard = init_logging(&config);

    // 启动失败时文件日志可能尚未就绪，错误横幅直接打到 stderr
    if let Err(e) = run_server().await {
        match e.root_cause().downcast_ref::<UtmkaError>() {
            Some(err) => eprintln!("{}", err.format_colored()),
            None => eprintln!("[ERROR] {:#}", e),
        }
        std::process::exit(1);
    }

    Ok(())
}
