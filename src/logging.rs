//! 日志初始化
//!
//! 终端被 TUI 占用，日志写入 <data_dir>/briefing/logs/briefing.log
//! RUST_LOG 优先于配置中的 log_level

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// 返回的 guard 需要活到程序退出，否则缓冲的日志会丢失
pub fn init_logging(log_dir: &Path, level: &str) -> Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("creating log directory {}", log_dir.display()))?;

    let appender = tracing_appender::rolling::never(log_dir, "briefing.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|err| anyhow!(err))?;

    Ok(guard)
}
