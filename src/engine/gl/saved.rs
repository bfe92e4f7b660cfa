//! ### English
//! Scoped save/restore of GL object bindings.
//!
//! ### 中文
//! GL 对象绑定的作用域保存/恢复。

use super::{GlApi, GlName};
use crate::engine::host::{ContextId, HostSurface};

/// ### English
/// Snapshots the bound 2D texture, renderbuffer and draw framebuffer on creation and rebinds
/// all three when dropped, on every exit path.
///
/// The context current at creation must still be current at drop; a mismatch means some code
/// switched contexts mid-operation and is caught by a debug assertion.
///
/// ### 中文
/// 创建时记录当前绑定的 2D 纹理、renderbuffer 与 draw framebuffer，并在 drop 时
/// （任何退出路径）重新绑定这三者。
///
/// 创建时 current 的上下文在 drop 时必须仍为 current；不一致说明有代码在操作中途切换了
/// 上下文，会被 debug 断言捕获。
#[must_use]
pub struct SavedBindings<'a> {
    gl: &'a dyn GlApi,
    host: &'a dyn HostSurface,
    context: Option<ContextId>,
    texture: GlName,
    renderbuffer: GlName,
    framebuffer: GlName,
}

impl<'a> SavedBindings<'a> {
    pub fn capture(gl: &'a dyn GlApi, host: &'a dyn HostSurface) -> Self {
        Self {
            gl,
            host,
            context: host.current_context(),
            texture: gl.texture_binding(),
            renderbuffer: gl.renderbuffer_binding(),
            framebuffer: gl.draw_framebuffer_binding(),
        }
    }
}

impl Drop for SavedBindings<'_> {
    fn drop(&mut self) {
        debug_assert_eq!(
            self.context,
            self.host.current_context(),
            "GL context switched while bindings were saved"
        );
        self.gl.bind_texture(self.texture);
        self.gl.bind_renderbuffer(self.renderbuffer);
        self.gl.bind_framebuffer(self.framebuffer);
    }
}
