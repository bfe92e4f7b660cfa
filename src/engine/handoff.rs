//! ### English
//! Copy-based frame handoff between the engine raster thread and the toolkit paint cycle.
//!
//! The producer draws into the render target, `present` copies it into the front buffer and
//! signals the gate with a fence; `render` waits on the gate and draws the front buffer onto
//! the toolkit surface; `resize` drains the GPU, invalidates the gate and reallocates both
//! buffers in place.
//!
//! ### 中文
//! 引擎光栅线程与工具包绘制周期之间基于复制的帧交接。
//!
//! 生产者绘制到渲染目标，`present` 将其复制到前缓冲并以 fence 通知关卡；`render` 等待关卡
//! 并把前缓冲绘制到工具包表面；`resize` 排空 GPU、使关卡失效并原地重新分配两个缓冲。

mod callbacks;
mod init;
mod present;
mod render;
mod resize;
mod teardown;

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

use dpi::PhysicalSize;

use crate::engine::frame::SynchronizationGate;
use crate::engine::gl::{GlApi, GlName};
use crate::engine::host::HostSurface;
use crate::engine::rendering::{BufferSet, ProducerContext};

/// ### English
/// Owns the buffer set, the gate guarding it and the producer context.
///
/// `present` and `make_current` run on the engine raster thread; `realize`, `render`,
/// `resize` and teardown run on the toolkit thread.
///
/// ### 中文
/// 持有 buffer set、保护它的关卡以及生产者上下文。
///
/// `present` 与 `make_current` 在引擎光栅线程运行；`realize`、`render`、`resize` 与销毁
/// 在工具包线程运行。
pub struct FrameHandoff {
    pub(super) gl: Arc<dyn GlApi>,
    pub(super) host: Arc<dyn HostSurface>,
    /// ### English
    /// Set once by `realize`.
    ///
    /// ### 中文
    /// 由 `realize` 设置一次。
    pub(super) producer: OnceLock<ProducerContext>,
    pub(super) gate: SynchronizationGate<BufferSet>,
    /// ### English
    /// Render-target framebuffer name, readable without the gate lock (`0` before realize and
    /// after release).
    ///
    /// ### 中文
    /// 渲染目标 framebuffer 名，无需关卡锁即可读取（realize 前与释放后为 `0`）。
    pub(super) framebuffer: AtomicU32,
    /// ### English
    /// Sequence of the last frame drawn by `render` (`0` = none since the last resize).
    ///
    /// ### 中文
    /// `render` 最近绘制的帧序号（`0` 表示自上次 resize 以来尚未绘制）。
    pub(super) last_drawn_seq: AtomicU64,
}

impl FrameHandoff {
    pub fn new(gl: Arc<dyn GlApi>, host: Arc<dyn HostSurface>) -> Self {
        Self {
            gl,
            host,
            producer: OnceLock::new(),
            gate: SynchronizationGate::new(BufferSet::new()),
            framebuffer: AtomicU32::new(0),
            last_drawn_seq: AtomicU64::new(0),
        }
    }

    pub fn is_realized(&self) -> bool {
        self.producer.get().is_some()
    }

    /// ### English
    /// Current allocation, or `None` if the buffers are not allocated.
    ///
    /// ### 中文
    /// 当前尺寸；缓冲未分配时返回 `None`。
    pub fn allocation(&self) -> Option<PhysicalSize<u32>> {
        let buffers = self.gate.lock();
        buffers.is_allocated().then(|| buffers.size())
    }

    pub fn front_texture(&self) -> GlName {
        self.gate.lock().front().texture
    }

    pub fn last_drawn_sequence(&self) -> u64 {
        self.last_drawn_seq.load(Ordering::Acquire)
    }
}
