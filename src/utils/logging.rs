//! # 日志初始化
//!
//! 诊断日志使用 `tracing`，写到标准错误，不与结果行混在一起。
//! `RUST_LOG` 优先；否则按 `-v` 次数选择级别。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `tracing-subscriber` (fmt + env-filter)

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// 由 `-v` 次数得到默认日志级别
pub fn level_for(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// 安装全局 subscriber（重复调用时忽略）
pub fn init(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for(verbose).as_str().to_lowercase()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .ok();
}
