use std::sync::atomic::Ordering;

use dpi::PhysicalSize;

use crate::engine::gl::{GL_NO_ERROR, SavedBindings};

use super::FrameHandoff;

impl FrameHandoff {
    /// ### English
    /// Draws the latest published frame over the toolkit's bound draw framebuffer of size
    /// `target`.
    ///
    /// Blocks until a frame is ready. Returns `true` in every case: drawing failures are
    /// logged, and a closed gate or an unbound default framebuffer draws nothing.
    ///
    /// ### 中文
    /// 把最新发布的帧绘制到工具包当前绑定的、尺寸为 `target` 的 draw framebuffer 上。
    ///
    /// 阻塞直到有帧就绪。任何情况下都返回 `true`：绘制失败只记录日志；关卡已关闭或当前为
    /// 默认 framebuffer 时不绘制。
    pub fn render(&self, target: PhysicalSize<u32>) -> bool {
        if self.gl.draw_framebuffer_binding() == 0 {
            log::trace!("render skipped: default framebuffer bound");
            return true;
        }

        let Some(buffers) = self.gate.wait_and_consume() else {
            log::debug!("render skipped: gate closed");
            return true;
        };
        self.gl.finish();

        let Some(token) = buffers.token() else {
            return true;
        };
        debug_assert!(
            token.fence().is_signaled(),
            "front buffer sampled before its fence signaled"
        );
        debug_assert_eq!(
            token.size(),
            buffers.size(),
            "ready frame outlived a resize"
        );
        let seq = token.seq();
        let previous = self.last_drawn_seq.swap(seq, Ordering::AcqRel);
        if previous != seq {
            log::trace!("drawing frame {seq} (previous {previous})");
        }

        {
            let _saved = SavedBindings::capture(&*self.gl, &*self.host);
            if let Err(err) = self
                .gl
                .draw_texture(buffers.front().texture, buffers.size(), target)
            {
                log::error!("failed to draw front buffer: {err}");
            }
            let error = self.gl.get_error();
            if error != GL_NO_ERROR {
                log::error!("GL error 0x{error:04x} while drawing front buffer");
            }
        }

        self.gl.finish();
        true
    }
}
