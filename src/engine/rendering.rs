//! ### English
//! Rendering module entry point.
//! Splits the GPU buffer set and the producer-side context wrapper into submodules.
//!
//! ### 中文
//! 渲染模块入口。
//! 将 GPU buffer set 与生产者侧上下文封装拆分到子模块。

mod buffer_set;
mod producer_context;

pub use buffer_set::{BufferSet, FrontBuffer, RenderTarget};
pub use producer_context::ProducerContext;

use dpi::PhysicalSize;

/// ### English
/// Clamps each dimension to at least 1 pixel (GL rejects zero-sized storage).
///
/// ### 中文
/// 将每一维钳制为至少 1 像素（GL 不接受零尺寸存储）。
pub fn clamp_size(size: PhysicalSize<u32>) -> PhysicalSize<u32> {
    PhysicalSize::new(size.width.max(1), size.height.max(1))
}
