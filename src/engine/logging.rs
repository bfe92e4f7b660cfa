//! ### English
//! Logger initialization for hosts that do not install their own `log` backend.
//!
//! ### 中文
//! 为没有自行安装 `log` 后端的宿主提供日志初始化。

use std::sync::Once;

/// ### English
/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. `"info"`,
/// `"frame_bridge=debug"`).
///
/// ### 中文
/// 日志配置。
///
/// `env_filter` 使用 `env_logger` 的过滤语法（例如 `"info"`、`"frame_bridge=debug"`）。
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

static INIT: Once = Once::new();

/// ### English
/// Installs the global logger once; later calls are ignored.
///
/// Filter precedence: explicit `env_filter`, then `RUST_LOG`, then `info`.
/// If another logger is already installed, it is left in place.
///
/// ### 中文
/// 只安装一次全局日志器；之后的调用会被忽略。
///
/// 过滤器优先级：显式 `env_filter`，其次 `RUST_LOG`，最后 `info`。
/// 若已安装其它日志器，则保持不变。
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Some(filter) = config.env_filter {
            builder.parse_filters(&filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(log::LevelFilter::Info);
        }

        builder.write_style(config.write_style);

        if builder.try_init().is_ok() {
            log::debug!("logging initialized");
        }
    });
}
