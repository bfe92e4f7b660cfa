//! ### English
//! Launch configuration for the embedded engine and the bridge.
//!
//! ### 中文
//! 内嵌引擎与 bridge 的启动配置。

use std::path::PathBuf;

use super::error::{BridgeError, Result};

/// ### English
/// Project arguments handed to the engine when it starts.
///
/// All strings are owned copies; the engine only borrows them for the duration of
/// `EmbeddedEngine::run`.
///
/// ### 中文
/// 引擎启动时传入的工程参数。
///
/// 所有字符串都是自有副本；引擎只在 `EmbeddedEngine::run` 期间借用它们。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineParams {
    /// ### English
    /// Entry-point script. Empty in snapshot mode.
    ///
    /// ### 中文
    /// 入口脚本。snapshot 模式下为空。
    pub main_path: PathBuf,
    /// ### English
    /// Directory holding the bundled assets.
    ///
    /// ### 中文
    /// 打包资源所在目录。
    pub assets_path: PathBuf,
    /// ### English
    /// Package resolution file. Empty in snapshot mode.
    ///
    /// ### 中文
    /// 包解析文件。snapshot 模式下为空。
    pub packages_path: PathBuf,
    /// ### English
    /// ICU data file.
    ///
    /// ### 中文
    /// ICU 数据文件。
    pub icu_data_path: PathBuf,
    /// ### English
    /// Command-line switches forwarded verbatim (first entry is the program name slot).
    ///
    /// ### 中文
    /// 原样转发的命令行参数（第一项为程序名占位）。
    pub args: Vec<String>,
}

impl EngineParams {
    /// ### English
    /// Parameters for a project run from source.
    ///
    /// ### 中文
    /// 从源码运行工程时的参数。
    pub fn new(
        main_path: impl Into<PathBuf>,
        assets_path: impl Into<PathBuf>,
        packages_path: impl Into<PathBuf>,
        icu_data_path: impl Into<PathBuf>,
        args: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            main_path: main_path.into(),
            assets_path: assets_path.into(),
            packages_path: packages_path.into(),
            icu_data_path: icu_data_path.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// ### English
    /// Parameters for a precompiled snapshot (no main script, no package file).
    ///
    /// ### 中文
    /// 预编译 snapshot 的参数（无入口脚本，无包文件）。
    pub fn snapshot(
        assets_path: impl Into<PathBuf>,
        icu_data_path: impl Into<PathBuf>,
        args: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self::new("", assets_path, "", icu_data_path, args)
    }

    /// ### English
    /// Returns `true` if this describes a snapshot launch.
    ///
    /// ### 中文
    /// 若为 snapshot 启动则返回 `true`。
    pub fn is_snapshot(&self) -> bool {
        self.main_path.as_os_str().is_empty()
    }

    /// ### English
    /// Checks the fields the engine cannot start without.
    ///
    /// ### 中文
    /// 检查引擎启动所必需的字段。
    pub fn validate(&self) -> Result<()> {
        if self.assets_path.as_os_str().is_empty() {
            return Err(BridgeError::InvalidParams(
                "assets path is empty".to_string(),
            ));
        }
        if self.icu_data_path.as_os_str().is_empty() {
            return Err(BridgeError::InvalidParams(
                "ICU data path is empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// ### English
/// Bridge-wide configuration.
///
/// ### 中文
/// bridge 全局配置。
#[derive(Debug, Clone, PartialEq)]
pub struct BridgeConfig {
    pub engine: EngineParams,
    /// ### English
    /// Device pixel ratio reported with every window-metrics event.
    ///
    /// ### 中文
    /// 每次窗口尺寸事件附带的设备像素比。
    pub pixel_ratio: f64,
}

impl BridgeConfig {
    pub fn new(engine: EngineParams) -> Self {
        Self {
            engine,
            pixel_ratio: 1.0,
        }
    }

    pub fn with_pixel_ratio(mut self, pixel_ratio: f64) -> Self {
        self.pixel_ratio = pixel_ratio;
        self
    }
}
