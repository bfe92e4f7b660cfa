//! ### English
//! Adapter between the host toolkit's surface events and the embedded engine.
//!
//! The toolkit calls `on_realize` / `on_resize` / `on_render` / `on_destroy` / `on_pointer`
//! on its own thread; the engine calls back into the frame handoff from its raster thread.
//!
//! ### 中文
//! 宿主工具包表面事件与内嵌引擎之间的适配层。
//!
//! 工具包在自身线程上调用 `on_realize` / `on_resize` / `on_render` / `on_destroy` /
//! `on_pointer`；引擎在其光栅线程上回调帧交接。

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use dpi::PhysicalSize;
use parking_lot::Mutex;

use crate::engine::config::BridgeConfig;
use crate::engine::error::{BridgeError, Result};
use crate::engine::gl::GlApi;
use crate::engine::handoff::FrameHandoff;
use crate::engine::host::{
    EmbeddedEngine, GlContext, HostSurface, RendererCallbacks, WindowMetrics,
};
use crate::engine::input::{PointerDispatcher, PointerEvent, PointerPhase};

/// ### English
/// One embedded engine instance bound to one toolkit surface.
///
/// ### 中文
/// 绑定到一个工具包表面的单个内嵌引擎实例。
pub struct EngineBridge {
    config: BridgeConfig,
    handoff: Arc<FrameHandoff>,
    engine: Mutex<Box<dyn EmbeddedEngine>>,
    /// ### English
    /// Whether `run` succeeded and `shutdown` has not been called yet.
    ///
    /// ### 中文
    /// `run` 是否已成功且尚未调用 `shutdown`。
    running: AtomicBool,
    destroyed: AtomicBool,
    pointer: Mutex<PointerDispatcher>,
}

impl EngineBridge {
    pub fn new(
        config: BridgeConfig,
        gl: Arc<dyn GlApi>,
        host: Arc<dyn HostSurface>,
        engine: Box<dyn EmbeddedEngine>,
    ) -> Self {
        Self {
            config,
            handoff: Arc::new(FrameHandoff::new(gl, host)),
            engine: Mutex::new(engine),
            running: AtomicBool::new(false),
            destroyed: AtomicBool::new(false),
            pointer: Mutex::new(PointerDispatcher::new()),
        }
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn handoff(&self) -> &Arc<FrameHandoff> {
        &self.handoff
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    fn metrics(&self, size: PhysicalSize<u32>) -> WindowMetrics {
        WindowMetrics {
            size,
            pixel_ratio: self.config.pixel_ratio,
        }
    }

    /// ### English
    /// Toolkit realize: creates the producer context, allocates the buffers, starts the
    /// engine and sends it the initial size. Returns `false` (after logging) on any failure,
    /// leaving nothing allocated or running.
    ///
    /// ### 中文
    /// 工具包 realize：创建生产者上下文、分配缓冲、启动引擎并发送初始尺寸。任何失败都在记录
    /// 日志后返回 `false`，且不会遗留已分配的资源或运行中的引擎。
    pub fn on_realize(
        &self,
        context: Option<&dyn GlContext>,
        size: Option<PhysicalSize<u32>>,
    ) -> bool {
        match self.realize(context, size) {
            Ok(()) => true,
            Err(err @ BridgeError::EngineStart(_)) => {
                log::error!("unable to start engine: {err}");
                false
            }
            Err(err) => {
                log::warn!("realize failed: {err}");
                false
            }
        }
    }

    fn realize(
        &self,
        context: Option<&dyn GlContext>,
        size: Option<PhysicalSize<u32>>,
    ) -> Result<()> {
        if self.destroyed.load(Ordering::Acquire) {
            return Err(BridgeError::AlreadyRealized);
        }
        let context = context.ok_or(BridgeError::MissingContext)?;
        let size = size.ok_or(BridgeError::InvalidAllocation {
            width: 0,
            height: 0,
        })?;
        self.config.engine.validate()?;

        self.handoff.realize(context, size)?;

        let callbacks: Arc<dyn RendererCallbacks> = self.handoff.clone();
        let mut engine = self.engine.lock();
        if let Err(err) = engine.run(&self.config.engine, callbacks) {
            drop(engine);
            self.handoff.release();
            return Err(BridgeError::EngineStart(err));
        }
        self.running.store(true, Ordering::Release);
        log::debug!("engine started at {}x{}", size.width, size.height);

        if !engine.send_window_metrics(self.metrics(size)) {
            log::warn!("engine rejected initial window metrics");
        }
        Ok(())
    }

    /// ### English
    /// Toolkit resize: reallocates the buffers, then (outside the gate lock) tells the engine
    /// the new size. Returns `false` if the surface is not realized.
    ///
    /// ### 中文
    /// 工具包 resize：重新分配缓冲，然后（在关卡锁之外）把新尺寸告知引擎。
    /// 若表面未 realize 则返回 `false`。
    pub fn on_resize(&self, size: PhysicalSize<u32>) -> bool {
        let Some(applied) = self.handoff.resize(size) else {
            return false;
        };
        log::debug!("resized to {}x{}", applied.width, applied.height);
        if self.is_running() && !self.engine.lock().send_window_metrics(self.metrics(applied)) {
            log::warn!("engine rejected window metrics");
        }
        true
    }

    /// ### English
    /// Toolkit paint. Always reports the paint as handled.
    ///
    /// ### 中文
    /// 工具包绘制。始终报告已处理。
    pub fn on_render(&self, target: PhysicalSize<u32>) -> bool {
        if !self.handoff.is_realized() {
            return true;
        }
        self.handoff.render(target)
    }

    /// ### English
    /// Toolkit destroy (idempotent). Closes the gate so a blocked paint returns, stops the
    /// engine, then deletes the GPU objects.
    ///
    /// ### 中文
    /// 工具包销毁（幂等）。先关闭关卡使阻塞的绘制返回，再停止引擎，最后删除 GPU 对象。
    pub fn on_destroy(&self) {
        if self.destroyed.swap(true, Ordering::AcqRel) {
            return;
        }
        self.handoff.close();
        if self.running.swap(false, Ordering::AcqRel) {
            self.engine.lock().shutdown();
            log::debug!("engine shut down");
        }
        self.handoff.release();
        self.pointer.lock().reset();
    }

    /// ### English
    /// Forwards one pointer event after debouncing. Returns whether it reached the engine.
    ///
    /// ### 中文
    /// 去抖后转发一个指针事件。返回该事件是否送达引擎。
    pub fn on_pointer(&self, phase: PointerPhase, x: f64, y: f64, timestamp_micros: u64) -> bool {
        if !self.is_running() {
            return false;
        }
        let event = PointerEvent {
            phase,
            x,
            y,
            timestamp_micros,
        };
        let Some(event) = self.pointer.lock().filter(event) else {
            log::trace!("suppressed pointer {phase:?}");
            return false;
        };
        self.engine.lock().send_pointer_event(event)
    }
}

impl Drop for EngineBridge {
    fn drop(&mut self) {
        self.on_destroy();
    }
}
