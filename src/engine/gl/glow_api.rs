//! ### English
//! `GlApi` on top of `glow`.
//!
//! ### 中文
//! 基于 `glow` 的 `GlApi` 实现。

use std::ffi::c_void;
use std::num::NonZeroU32;

use dpi::PhysicalSize;
use glow::HasContext as _;

use super::{FenceHandle, GlApi, GlName};
use crate::engine::error::{BridgeError, Result};

/// ### English
/// Expected forms: `"4.6.0 ..."` or `"OpenGL ES 3.2 ..."`.
///
/// ### 中文
/// 期望的版本字符串形式：`"4.6.0 ..."` 或 `"OpenGL ES 3.2 ..."`。
fn parse_gl_version(version: &str) -> (u32, u32) {
    let mut major = 0u32;
    let mut minor = 0u32;
    let number_token = version.split_whitespace().find(|t| {
        t.chars()
            .next()
            .map(|c| c.is_ascii_digit())
            .unwrap_or(false)
    });
    if let Some(token) = number_token {
        let mut parts = token.split('.');
        if let Some(m) = parts.next().and_then(|s| s.parse::<u32>().ok()) {
            major = m;
        }
        if let Some(n) = parts.next().and_then(|s| s.parse::<u32>().ok()) {
            minor = n;
        }
    }
    (major, minor)
}

/// ### English
/// Sync objects are core in desktop GL 3.2 and GLES 3.0.
///
/// ### 中文
/// sync 对象在桌面 GL 3.2 与 GLES 3.0 中成为核心特性。
fn supports_fences(version: &str) -> bool {
    let (major, minor) = parse_gl_version(version);
    if version.starts_with("OpenGL ES") {
        major >= 3
    } else {
        major > 3 || (major == 3 && minor >= 2)
    }
}

#[inline]
fn texture(name: GlName) -> Option<glow::NativeTexture> {
    NonZeroU32::new(name).map(glow::NativeTexture)
}

#[inline]
fn renderbuffer(name: GlName) -> Option<glow::NativeRenderbuffer> {
    NonZeroU32::new(name).map(glow::NativeRenderbuffer)
}

#[inline]
fn framebuffer(name: GlName) -> Option<glow::NativeFramebuffer> {
    NonZeroU32::new(name).map(glow::NativeFramebuffer)
}

#[inline]
fn native_fence(fence: FenceHandle) -> glow::NativeFence {
    glow::NativeFence(fence.0 as usize as *mut _)
}

/// ### English
/// Production GL backend.
///
/// Both the producer and the consumer context belong to one share group and are loaded
/// through the same loader, so a single function table serves both threads.
///
/// ### 中文
/// 生产环境的 GL 后端。
///
/// 生产者与消费者上下文属于同一个共享组，并通过同一个 loader 加载，因此一张函数表即可
/// 服务两个线程。
pub struct GlowApi {
    gl: glow::Context,
    version: String,
}

/// ### English
/// The function table is immutable after loading. Each call only touches the context
/// current on the calling thread, and the bridge never makes one context current on two
/// threads.
///
/// ### 中文
/// 函数表加载后不可变。每次调用只作用于调用线程上当前的上下文，且 bridge 从不会让同一
/// 上下文同时在两个线程上 current。
unsafe impl Send for GlowApi {}
unsafe impl Sync for GlowApi {}

impl GlowApi {
    /// ### English
    /// Loads GL entry points through `loader` and checks the version has sync objects.
    ///
    /// # Safety
    /// A context of the share group must be current on the calling thread, and `loader`
    /// must return valid entry points for it.
    ///
    /// ### 中文
    /// 通过 `loader` 加载 GL 入口并检查版本是否支持 sync 对象。
    ///
    /// # Safety
    /// 调用线程上必须有该共享组中的某个上下文处于 current，且 `loader` 必须为其返回有效入口。
    pub unsafe fn from_loader_function<F>(loader: F) -> Result<Self>
    where
        F: FnMut(&str) -> *const c_void,
    {
        let gl = unsafe { glow::Context::from_loader_function(loader) };
        let version = unsafe { gl.get_parameter_string(glow::VERSION) };
        if !supports_fences(&version) {
            return Err(BridgeError::UnsupportedGl(version));
        }
        log::debug!("loaded GL {version}");
        Ok(Self { gl, version })
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}

impl GlApi for GlowApi {
    fn gen_texture(&self) -> std::result::Result<GlName, String> {
        unsafe { self.gl.create_texture() }.map(|t| t.0.get())
    }

    fn gen_renderbuffer(&self) -> std::result::Result<GlName, String> {
        unsafe { self.gl.create_renderbuffer() }.map(|rb| rb.0.get())
    }

    fn gen_framebuffer(&self) -> std::result::Result<GlName, String> {
        unsafe { self.gl.create_framebuffer() }.map(|fb| fb.0.get())
    }

    fn delete_texture(&self, name: GlName) {
        if let Some(t) = texture(name) {
            unsafe { self.gl.delete_texture(t) };
        }
    }

    fn delete_renderbuffer(&self, name: GlName) {
        if let Some(rb) = renderbuffer(name) {
            unsafe { self.gl.delete_renderbuffer(rb) };
        }
    }

    fn delete_framebuffer(&self, name: GlName) {
        if let Some(fb) = framebuffer(name) {
            unsafe { self.gl.delete_framebuffer(fb) };
        }
    }

    fn bind_texture(&self, name: GlName) {
        unsafe { self.gl.bind_texture(glow::TEXTURE_2D, texture(name)) };
    }

    fn bind_renderbuffer(&self, name: GlName) {
        unsafe { self.gl.bind_renderbuffer(glow::RENDERBUFFER, renderbuffer(name)) };
    }

    fn bind_framebuffer(&self, name: GlName) {
        unsafe { self.gl.bind_framebuffer(glow::FRAMEBUFFER, framebuffer(name)) };
    }

    fn texture_binding(&self) -> GlName {
        unsafe { self.gl.get_parameter_i32(glow::TEXTURE_BINDING_2D) as GlName }
    }

    fn renderbuffer_binding(&self) -> GlName {
        unsafe { self.gl.get_parameter_i32(glow::RENDERBUFFER_BINDING) as GlName }
    }

    fn draw_framebuffer_binding(&self) -> GlName {
        unsafe { self.gl.get_parameter_i32(glow::DRAW_FRAMEBUFFER_BINDING) as GlName }
    }

    fn allocate_texture(&self, size: PhysicalSize<u32>) {
        let gl = &self.gl;
        unsafe {
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MIN_FILTER,
                glow::NEAREST as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MAG_FILTER,
                glow::NEAREST as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_WRAP_S,
                glow::CLAMP_TO_EDGE as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_WRAP_T,
                glow::CLAMP_TO_EDGE as i32,
            );
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA8 as i32,
                size.width as i32,
                size.height as i32,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(None),
            );
        }
    }

    fn allocate_depth_storage(&self, size: PhysicalSize<u32>) {
        unsafe {
            self.gl.renderbuffer_storage(
                glow::RENDERBUFFER,
                glow::DEPTH_COMPONENT24,
                size.width as i32,
                size.height as i32,
            );
        }
    }

    fn attach_color_texture(&self, name: GlName) {
        unsafe {
            self.gl.framebuffer_texture_2d(
                glow::FRAMEBUFFER,
                glow::COLOR_ATTACHMENT0,
                glow::TEXTURE_2D,
                texture(name),
                0,
            );
        }
    }

    fn attach_depth_renderbuffer(&self, name: GlName) {
        unsafe {
            self.gl.framebuffer_renderbuffer(
                glow::FRAMEBUFFER,
                glow::DEPTH_ATTACHMENT,
                glow::RENDERBUFFER,
                renderbuffer(name),
            );
        }
    }

    fn copy_framebuffer_to_texture(&self, size: PhysicalSize<u32>) {
        unsafe {
            self.gl.copy_tex_sub_image_2d(
                glow::TEXTURE_2D,
                0,
                0,
                0,
                0,
                0,
                size.width as i32,
                size.height as i32,
            );
        }
    }

    fn draw_texture(
        &self,
        name: GlName,
        source: PhysicalSize<u32>,
        target: PhysicalSize<u32>,
    ) -> std::result::Result<(), String> {
        let gl = &self.gl;
        /*
        ### English
        Framebuffer objects are not shared between contexts, so the read side of the blit is
        a transient FBO created on the consumer context.

        ### 中文
        framebuffer 对象不在上下文之间共享，因此 blit 的读端是在消费者上下文上临时创建的 FBO。
        */
        let read_fbo = unsafe { gl.create_framebuffer()? };
        let draw_fbo = self.draw_framebuffer_binding();
        unsafe {
            gl.bind_framebuffer(glow::READ_FRAMEBUFFER, Some(read_fbo));
            gl.framebuffer_texture_2d(
                glow::READ_FRAMEBUFFER,
                glow::COLOR_ATTACHMENT0,
                glow::TEXTURE_2D,
                texture(name),
                0,
            );
            gl.blit_framebuffer(
                0,
                0,
                source.width as i32,
                source.height as i32,
                0,
                0,
                target.width as i32,
                target.height as i32,
                glow::COLOR_BUFFER_BIT,
                glow::NEAREST,
            );
            gl.bind_framebuffer(glow::READ_FRAMEBUFFER, framebuffer(draw_fbo));
            gl.delete_framebuffer(read_fbo);
        }
        Ok(())
    }

    fn get_error(&self) -> u32 {
        unsafe { self.gl.get_error() }
    }

    fn finish(&self) {
        unsafe { self.gl.finish() };
    }

    fn fence_sync(&self) -> Option<FenceHandle> {
        unsafe { self.gl.fence_sync(glow::SYNC_GPU_COMMANDS_COMPLETE, 0) }
            .ok()
            .map(|sync| FenceHandle(sync.0 as usize as u64))
    }

    fn delete_sync(&self, fence: FenceHandle) {
        if fence.is_null() {
            return;
        }
        unsafe { self.gl.delete_sync(native_fence(fence)) };
    }

    fn fence_signaled(&self, fence: FenceHandle) -> bool {
        if fence.is_null() {
            return false;
        }
        let status = unsafe { self.gl.client_wait_sync(native_fence(fence), 0, 0) };
        status == glow::ALREADY_SIGNALED || status == glow::CONDITION_SATISFIED
    }
}
