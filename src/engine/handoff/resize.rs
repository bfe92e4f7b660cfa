use std::sync::atomic::Ordering;

use dpi::PhysicalSize;

use crate::engine::gl::SavedBindings;
use crate::engine::rendering::clamp_size;

use super::FrameHandoff;

impl FrameHandoff {
    /// ### English
    /// Reallocates both buffers to `size` (zero dimensions clamp to 1) and invalidates the
    /// ready frame, so the next `render` waits for a frame produced at the new size.
    ///
    /// Runs on the toolkit thread; resizes must not overlap. Returns the applied size, or
    /// `None` if the surface is not realized. The engine is not notified here.
    ///
    /// ### 中文
    /// 把两个缓冲重新分配为 `size`（零尺寸钳制为 1），并使已就绪帧失效，使下一次 `render`
    /// 等待以新尺寸生成的帧。
    ///
    /// 在工具包线程运行；resize 不得重叠。返回实际应用的尺寸；若表面未 realize 则返回
    /// `None`。此处不通知引擎。
    pub fn resize(&self, size: PhysicalSize<u32>) -> Option<PhysicalSize<u32>> {
        let mut gate = self.gate.lock();
        if gate.is_closed() || !gate.is_allocated() {
            log::debug!("resize ignored: surface is not realized");
            return None;
        }

        self.gl.finish();
        gate.invalidate();

        let size = clamp_size(size);
        {
            let _saved = SavedBindings::capture(&*self.gl, &*self.host);
            gate.reallocate(&*self.gl, size);
        }

        self.gl.finish();
        gate.invalidate();
        self.last_drawn_seq.store(0, Ordering::Release);
        gate.notify_all();
        Some(size)
    }
}
