use crate::engine::frame::{FrameToken, GpuFence};
use crate::engine::gl::{GL_NO_ERROR, SavedBindings};

use super::FrameHandoff;

impl FrameHandoff {
    /// ### English
    /// Publishes the engine's finished frame: copies the render target into the front buffer,
    /// fences the copy and signals the gate.
    ///
    /// Runs on the engine raster thread with the producer context current. A GL error after
    /// the copy is logged and the frame is still published.
    ///
    /// ### 中文
    /// 发布引擎已完成的帧：把渲染目标复制到前缓冲，为该复制插入 fence 并通知关卡。
    ///
    /// 在引擎光栅线程上运行，且生产者上下文为 current。复制后的 GL 错误只记录日志，
    /// 该帧仍会发布。
    pub fn present(&self) -> bool {
        let mut gate = self.gate.lock();
        if gate.is_closed() || !gate.is_allocated() {
            log::warn!("present skipped: surface is not realized");
            return false;
        }

        self.gl.finish();
        {
            let _saved = SavedBindings::capture(&*self.gl, &*self.host);
            gate.copy_to_front(&*self.gl);
        }
        let error = self.gl.get_error();
        if error != GL_NO_ERROR {
            log::error!("GL error 0x{error:04x} while copying frame to front buffer");
        }

        // Old fence goes before the new one is issued.
        gate.invalidate();
        let Some(fence) = GpuFence::insert(&self.gl) else {
            log::warn!("present skipped: fence creation failed");
            return false;
        };
        self.gl.finish();

        let seq = gate.next_sequence();
        let size = gate.size();
        gate.signal(FrameToken::new(fence, seq, size));
        self.host.queue_render();
        true
    }
}
