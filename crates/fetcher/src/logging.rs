// logging.rs
// 日志初始化：tracing-subscriber 输出到 stderr，级别由 RUST_LOG 控制。
use tracing_subscriber::EnvFilter;

/// 默认日志级别
pub const DEFAULT_LOG_FILTER: &str = "fetcher=info";

/// 初始化全局日志；重复调用时忽略后续调用
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
