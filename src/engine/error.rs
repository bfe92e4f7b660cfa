//! ### English
//! Error type shared by the setup paths of the bridge.
//!
//! Per-frame failures never surface here: they are logged and the frame is dropped.
//!
//! ### 中文
//! bridge 初始化路径共用的错误类型。
//!
//! 每帧的失败不会走到这里：只记录日志并丢弃该帧。

use thiserror::Error;

/// ### English
/// Result alias used by setup and construction code.
///
/// ### 中文
/// 初始化与构造代码使用的 Result 别名。
pub type Result<T> = std::result::Result<T, BridgeError>;

/// ### English
/// Construction-time failures. Entry points called by the engine or the toolkit collapse
/// these into a `bool` after logging them.
///
/// ### 中文
/// 构造期失败。由引擎或 UI 工具包调用的入口会在记录日志后把它们折叠为 `bool`。
#[derive(Error, Debug)]
pub enum BridgeError {
    /// ### English
    /// The toolkit realized the surface without a GPU context.
    ///
    /// ### 中文
    /// 工具包 realize 时没有提供 GPU 上下文。
    #[error("no GPU context was supplied")]
    MissingContext,

    /// ### English
    /// The surface allocation is missing or has a zero dimension.
    ///
    /// ### 中文
    /// 表面尺寸缺失或某一维为 0。
    #[error("invalid surface allocation {width}x{height}")]
    InvalidAllocation { width: u32, height: u32 },

    #[error("surface is already realized")]
    AlreadyRealized,

    /// ### English
    /// The host could not create the producer context.
    ///
    /// ### 中文
    /// 宿主无法创建生产者上下文。
    #[error("failed to create producer context: {0}")]
    ContextCreation(String),

    #[error("producer context could not be made current")]
    ContextNotCurrent,

    /// ### English
    /// A GL object could not be created.
    ///
    /// ### 中文
    /// 无法创建 GL 对象。
    #[error("failed to create GL object: {0}")]
    GlObject(String),

    /// ### English
    /// The loaded GL version has no sync objects.
    ///
    /// ### 中文
    /// 已加载的 GL 版本不支持 sync 对象。
    #[error("GL version without fence support: {0}")]
    UnsupportedGl(String),

    #[error("invalid engine parameters: {0}")]
    InvalidParams(String),

    /// ### English
    /// The embedded engine refused to run.
    ///
    /// ### 中文
    /// 内嵌引擎启动失败。
    #[error("engine failed to start: {0}")]
    EngineStart(String),
}
