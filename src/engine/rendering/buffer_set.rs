//! ### English
//! GPU-side resources of the handoff: the producer's render target and the consumer's front
//! buffer. No synchronization of its own; callers serialize access through the gate.
//!
//! ### 中文
//! 交接的 GPU 侧资源：生产者的渲染目标与消费者的前缓冲。自身不做同步；调用方通过关卡
//! 串行化访问。

use dpi::PhysicalSize;

use crate::engine::error::{BridgeError, Result};
use crate::engine::gl::{GlApi, GlName};

/// ### English
/// Off-screen framebuffer the engine draws into.
///
/// ### 中文
/// 引擎绘制所用的离屏 framebuffer。
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderTarget {
    pub color_texture: GlName,
    pub depth_renderbuffer: GlName,
    pub framebuffer: GlName,
    pub size: PhysicalSize<u32>,
}

/// ### English
/// Texture the consumer samples from. Its contents are replaced in place, never swapped.
///
/// ### 中文
/// 消费者采样的纹理。其内容原地替换，从不交换。
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrontBuffer {
    pub texture: GlName,
    pub size: PhysicalSize<u32>,
}

/// ### English
/// Render target plus front buffer, always sized identically.
///
/// ### 中文
/// 渲染目标与前缓冲，两者尺寸始终一致。
#[derive(Debug, Default)]
pub struct BufferSet {
    target: RenderTarget,
    front: FrontBuffer,
    allocated: bool,
}

impl BufferSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_allocated(&self) -> bool {
        self.allocated
    }

    pub fn target(&self) -> &RenderTarget {
        &self.target
    }

    pub fn front(&self) -> &FrontBuffer {
        &self.front
    }

    pub fn size(&self) -> PhysicalSize<u32> {
        self.front.size
    }

    /// ### English
    /// Creates both buffers at `size`. Leaves no objects behind on failure.
    ///
    /// Leaves texture, renderbuffer and framebuffer bindings at 0.
    ///
    /// ### 中文
    /// 以 `size` 创建两个缓冲。失败时不遗留任何对象。
    ///
    /// 结束时纹理、renderbuffer 与 framebuffer 绑定均为 0。
    pub fn allocate(&mut self, gl: &dyn GlApi, size: PhysicalSize<u32>) -> Result<()> {
        if self.allocated {
            return Err(BridgeError::AlreadyRealized);
        }
        if size.width == 0 || size.height == 0 {
            return Err(BridgeError::InvalidAllocation {
                width: size.width,
                height: size.height,
            });
        }

        if let Err(err) = self.create_objects(gl) {
            self.delete_objects(gl);
            return Err(BridgeError::GlObject(err));
        }

        gl.bind_framebuffer(self.target.framebuffer);
        gl.attach_color_texture(self.target.color_texture);
        gl.attach_depth_renderbuffer(self.target.depth_renderbuffer);
        gl.bind_framebuffer(0);

        self.allocated = true;
        self.specify_storage(gl, size);
        log::debug!(
            "allocated buffers {}x{} (fbo {}, front {})",
            size.width,
            size.height,
            self.target.framebuffer,
            self.front.texture
        );
        Ok(())
    }

    fn create_objects(&mut self, gl: &dyn GlApi) -> std::result::Result<(), String> {
        self.target.color_texture = gl.gen_texture()?;
        self.target.depth_renderbuffer = gl.gen_renderbuffer()?;
        self.target.framebuffer = gl.gen_framebuffer()?;
        self.front.texture = gl.gen_texture()?;
        Ok(())
    }

    /// ### English
    /// Resizes both buffers in place, keeping every object name. Must not race a present or a
    /// render. Zero dimensions are clamped to 1.
    ///
    /// ### 中文
    /// 原地调整两个缓冲的尺寸，保留所有对象名。不得与 present 或 render 并发。
    /// 零尺寸会被钳制为 1。
    pub fn reallocate(&mut self, gl: &dyn GlApi, size: PhysicalSize<u32>) -> bool {
        if !self.allocated {
            return false;
        }
        let size = super::clamp_size(size);
        self.specify_storage(gl, size);
        log::debug!("reallocated buffers to {}x{}", size.width, size.height);
        true
    }

    fn specify_storage(&mut self, gl: &dyn GlApi, size: PhysicalSize<u32>) {
        gl.bind_texture(self.target.color_texture);
        gl.allocate_texture(size);
        gl.bind_texture(self.front.texture);
        gl.allocate_texture(size);
        gl.bind_texture(0);

        gl.bind_renderbuffer(self.target.depth_renderbuffer);
        gl.allocate_depth_storage(size);
        gl.bind_renderbuffer(0);

        self.target.size = size;
        self.front.size = size;
    }

    /// ### English
    /// Copies the render target's colour into the front buffer at the current size.
    ///
    /// Changes the texture and framebuffer bindings; callers restore them.
    ///
    /// ### 中文
    /// 按当前尺寸把渲染目标的颜色复制到前缓冲。
    ///
    /// 会改变纹理与 framebuffer 绑定；由调用方负责恢复。
    pub fn copy_to_front(&self, gl: &dyn GlApi) {
        gl.bind_framebuffer(self.target.framebuffer);
        gl.bind_texture(self.front.texture);
        gl.copy_framebuffer_to_texture(self.front.size);
    }

    /// ### English
    /// Deletes every GPU object (idempotent; safe on a never-allocated set).
    ///
    /// ### 中文
    /// 删除所有 GPU 对象（幂等；对从未分配的 set 也安全）。
    pub fn release(&mut self, gl: &dyn GlApi) {
        if !self.allocated {
            return;
        }
        self.delete_objects(gl);
        self.allocated = false;
        log::debug!("released buffers");
    }

    fn delete_objects(&mut self, gl: &dyn GlApi) {
        if self.target.framebuffer != 0 {
            gl.delete_framebuffer(self.target.framebuffer);
        }
        if self.target.depth_renderbuffer != 0 {
            gl.delete_renderbuffer(self.target.depth_renderbuffer);
        }
        if self.target.color_texture != 0 {
            gl.delete_texture(self.target.color_texture);
        }
        if self.front.texture != 0 {
            gl.delete_texture(self.front.texture);
        }
        self.target = RenderTarget::default();
        self.front = FrontBuffer::default();
    }
}
