//! ### English
//! Seams to the two external collaborators: the host UI toolkit (surface, contexts, repaint
//! scheduling) and the embedded rendering engine (run, metrics, input, shutdown).
//!
//! ### 中文
//! 与两个外部协作方的接缝：宿主 UI 工具包（表面、上下文、重绘调度）与内嵌渲染引擎
//! （启动、尺寸、输入、关闭）。

use std::sync::Arc;

use dpi::PhysicalSize;

use super::config::EngineParams;
use super::gl::GlName;
use super::input::PointerEvent;

/// ### English
/// Opaque identity of a GL context, used to detect unexpected context switches.
///
/// ### 中文
/// GL 上下文的不透明标识，用于检测意外的上下文切换。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ContextId(pub u64);

/// ### English
/// A GL context borrowed from the environment. The bridge never destroys it.
///
/// ### 中文
/// 从环境借用的 GL 上下文。bridge 从不销毁它。
pub trait GlContext: Send + Sync {
    /// ### English
    /// Makes this context current on the calling thread.
    ///
    /// ### 中文
    /// 使该上下文在调用线程上变为 current。
    fn make_current(&self) -> bool;

    fn id(&self) -> ContextId;
}

/// ### English
/// The toolkit-side drawing surface.
///
/// ### 中文
/// 工具包侧的绘制表面。
pub trait HostSurface: Send + Sync {
    /// ### English
    /// Creates the producer context in the same share group as `consumer`.
    ///
    /// ### 中文
    /// 创建与 `consumer` 处于同一共享组的生产者上下文。
    fn create_producer_context(
        &self,
        consumer: &dyn GlContext,
    ) -> Result<Box<dyn GlContext>, String>;

    /// ### English
    /// Context current on the calling thread, if any.
    ///
    /// ### 中文
    /// 调用线程上当前的上下文（若有）。
    fn current_context(&self) -> Option<ContextId>;

    /// ### English
    /// Makes `context` current on the calling thread again, or clears the current context
    /// for `None`. Used to hand the thread back to whatever the toolkit had current.
    ///
    /// ### 中文
    /// 在调用线程上重新使 `context` 成为 current；为 `None` 时清除当前上下文。
    /// 用于把线程交还给工具包原先的 current 上下文。
    fn restore_context(&self, context: Option<ContextId>) -> bool;

    /// ### English
    /// Asks the toolkit to schedule a repaint. May be called from the producer thread.
    ///
    /// ### 中文
    /// 请求工具包安排一次重绘。可能在生产者线程调用。
    fn queue_render(&self);
}

/// ### English
/// Render callbacks the engine invokes from its own raster thread.
///
/// ### 中文
/// 引擎在其自身光栅线程上调用的渲染回调。
pub trait RendererCallbacks: Send + Sync {
    fn make_current(&self) -> bool;
    fn clear_current(&self) -> bool;
    fn present(&self) -> bool;
    /// ### English
    /// Framebuffer the engine must draw into. Pure query.
    ///
    /// ### 中文
    /// 引擎应绘制到的 framebuffer。纯查询。
    fn framebuffer(&self) -> GlName;
}

/// ### English
/// Logical surface size plus pixel ratio, as reported to the engine.
///
/// ### 中文
/// 上报给引擎的逻辑表面尺寸与像素比。
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WindowMetrics {
    pub size: PhysicalSize<u32>,
    pub pixel_ratio: f64,
}

/// ### English
/// The embedded rendering engine.
///
/// ### 中文
/// 内嵌渲染引擎。
pub trait EmbeddedEngine: Send {
    /// ### English
    /// Starts the engine with `callbacks` registered as its GL renderer.
    ///
    /// ### 中文
    /// 启动引擎，并把 `callbacks` 注册为其 GL 渲染器。
    fn run(
        &mut self,
        params: &EngineParams,
        callbacks: Arc<dyn RendererCallbacks>,
    ) -> Result<(), String>;

    fn send_window_metrics(&mut self, metrics: WindowMetrics) -> bool;
    fn send_pointer_event(&mut self, event: PointerEvent) -> bool;

    /// ### English
    /// Stops the engine and drops the registered callbacks.
    ///
    /// ### 中文
    /// 停止引擎并释放已注册的回调。
    fn shutdown(&mut self);
}
