//! ### English
//! The narrow GL surface used by the frame handoff.
//!
//! Every GPU call the core issues goes through `GlApi`, so the handoff logic can run against
//! the real `glow` backend or a recording implementation in tests.
//!
//! ### 中文
//! 帧交接所用的精简 GL 接口。
//!
//! 核心发出的所有 GPU 调用都经过 `GlApi`，因此交接逻辑既可跑在真实的 `glow` 后端上，
//! 也可以在测试中跑在记录型实现上。
mod glow_api;
mod saved;

use dpi::PhysicalSize;

pub use glow_api::GlowApi;
pub use saved::SavedBindings;

/// ### English
/// GL object name (`GLuint`). `0` means "no object".
///
/// ### 中文
/// GL 对象名（`GLuint`）。`0` 表示“无对象”。
pub type GlName = u32;

/// ### English
/// `GL_NO_ERROR`.
///
/// ### 中文
/// `GL_NO_ERROR`。
pub const GL_NO_ERROR: u32 = 0;

/// ### English
/// GPU sync object handle (`GLsync` cast to `u64`). `0` means "no fence".
///
/// ### 中文
/// GPU sync 对象句柄（`GLsync` 转为 `u64`）。`0` 表示“无 fence”。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct FenceHandle(pub u64);

impl FenceHandle {
    pub const NULL: Self = Self(0);

    #[inline]
    pub const fn is_null(&self) -> bool {
        self.0 == 0
    }
}

/// ### English
/// GPU operations issued by the buffer set and the pipelines.
///
/// Calls act on whichever context is current on the calling thread. Texture calls target
/// `TEXTURE_2D`; framebuffer binds target `FRAMEBUFFER` (read + draw).
///
/// ### 中文
/// buffer set 与各管线发出的 GPU 操作。
///
/// 调用作用于调用线程上当前的上下文。纹理调用作用于 `TEXTURE_2D`；framebuffer 绑定作用于
/// `FRAMEBUFFER`（读 + 写）。
pub trait GlApi: Send + Sync {
    fn gen_texture(&self) -> Result<GlName, String>;
    fn gen_renderbuffer(&self) -> Result<GlName, String>;
    fn gen_framebuffer(&self) -> Result<GlName, String>;

    fn delete_texture(&self, texture: GlName);
    fn delete_renderbuffer(&self, renderbuffer: GlName);
    fn delete_framebuffer(&self, framebuffer: GlName);

    fn bind_texture(&self, texture: GlName);
    fn bind_renderbuffer(&self, renderbuffer: GlName);
    fn bind_framebuffer(&self, framebuffer: GlName);

    fn texture_binding(&self) -> GlName;
    fn renderbuffer_binding(&self) -> GlName;
    fn draw_framebuffer_binding(&self) -> GlName;

    /// ### English
    /// (Re)specifies RGBA8 storage for the bound texture with nearest filtering and
    /// clamp-to-edge wrapping. Previous contents are discarded.
    ///
    /// ### 中文
    /// 为当前绑定的纹理（重新）分配 RGBA8 存储，最近邻过滤、clamp-to-edge 环绕。
    /// 原有内容会被丢弃。
    fn allocate_texture(&self, size: PhysicalSize<u32>);

    /// ### English
    /// (Re)specifies 24-bit depth storage for the bound renderbuffer.
    ///
    /// ### 中文
    /// 为当前绑定的 renderbuffer（重新）分配 24 位深度存储。
    fn allocate_depth_storage(&self, size: PhysicalSize<u32>);

    fn attach_color_texture(&self, texture: GlName);
    fn attach_depth_renderbuffer(&self, renderbuffer: GlName);

    /// ### English
    /// Copies the `size` region at the origin of the bound framebuffer into the bound
    /// texture (`CopyTexSubImage2D`, no reallocation).
    ///
    /// ### 中文
    /// 把当前绑定 framebuffer 原点处 `size` 大小的区域复制到当前绑定纹理
    /// （`CopyTexSubImage2D`，不重新分配）。
    fn copy_framebuffer_to_texture(&self, size: PhysicalSize<u32>);

    /// ### English
    /// Draws `texture` (of `source` size) over the full `target` area of the bound draw
    /// framebuffer.
    ///
    /// ### 中文
    /// 把 `texture`（尺寸为 `source`）绘制到当前绑定 draw framebuffer 的整个 `target` 区域。
    fn draw_texture(
        &self,
        texture: GlName,
        source: PhysicalSize<u32>,
        target: PhysicalSize<u32>,
    ) -> Result<(), String>;

    fn get_error(&self) -> u32;
    fn finish(&self);

    /// ### English
    /// Inserts a "GPU commands complete" fence. `None` if the driver refused.
    ///
    /// ### 中文
    /// 插入“GPU 命令完成” fence。驱动拒绝时返回 `None`。
    fn fence_sync(&self) -> Option<FenceHandle>;
    fn delete_sync(&self, fence: FenceHandle);

    /// ### English
    /// Non-blocking status query: `true` once the fence has been reached.
    ///
    /// ### 中文
    /// 非阻塞状态查询：fence 已到达时返回 `true`。
    fn fence_signaled(&self, fence: FenceHandle) -> bool;
}
