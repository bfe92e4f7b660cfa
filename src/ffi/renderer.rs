//! ### English
//! C callback table for engines that take an OpenGL renderer as function pointers plus an
//! opaque user-data pointer.
//!
//! ### 中文
//! 为以“函数指针 + 不透明 user data”形式接收 OpenGL 渲染器的引擎提供的 C 回调表。

use std::ffi::c_void;
use std::sync::Arc;

use crate::engine::host::RendererCallbacks;

pub type BoolCallback = Option<unsafe extern "C" fn(user_data: *mut c_void) -> bool>;
pub type UIntCallback = Option<unsafe extern "C" fn(user_data: *mut c_void) -> u32>;

#[repr(C)]
/// ### English
/// OpenGL renderer callback table.
///
/// ### 中文
/// OpenGL 渲染器回调表。
#[derive(Clone, Copy, Debug)]
pub struct FrameBridgeOpenGlRendererConfig {
    /// ### English
    /// `size_of::<FrameBridgeOpenGlRendererConfig>()`.
    ///
    /// ### 中文
    /// `size_of::<FrameBridgeOpenGlRendererConfig>()`。
    pub struct_size: usize,
    pub make_current: BoolCallback,
    pub clear_current: BoolCallback,
    pub present: BoolCallback,
    /// ### English
    /// Returns the framebuffer the engine draws into.
    ///
    /// ### 中文
    /// 返回引擎绘制所用的 framebuffer。
    pub fbo_callback: UIntCallback,
}

impl FrameBridgeOpenGlRendererConfig {
    pub fn new() -> Self {
        Self {
            struct_size: std::mem::size_of::<Self>(),
            make_current: Some(make_current_trampoline),
            clear_current: Some(clear_current_trampoline),
            present: Some(present_trampoline),
            fbo_callback: Some(fbo_trampoline),
        }
    }
}

impl Default for FrameBridgeOpenGlRendererConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// ### English
/// Boxes `callbacks` into the user-data pointer the trampolines expect.
/// Free it with `release_renderer_user_data` once the engine has shut down.
///
/// ### 中文
/// 把 `callbacks` 装箱为跳板函数所需的 user data 指针。
/// 引擎关闭后用 `release_renderer_user_data` 释放。
pub fn renderer_user_data(callbacks: Arc<dyn RendererCallbacks>) -> *mut c_void {
    Box::into_raw(Box::new(callbacks)).cast()
}

/// ### English
/// Frees a pointer returned by `renderer_user_data`. NULL is ignored.
///
/// # Safety
/// `user_data` must come from `renderer_user_data` and must not be used afterwards.
///
/// ### 中文
/// 释放 `renderer_user_data` 返回的指针。NULL 会被忽略。
///
/// # Safety
/// `user_data` 必须来自 `renderer_user_data`，且释放后不得再使用。
pub unsafe fn release_renderer_user_data(user_data: *mut c_void) {
    if user_data.is_null() {
        return;
    }
    unsafe {
        drop(Box::from_raw(user_data.cast::<Arc<dyn RendererCallbacks>>()));
    }
}

unsafe fn callbacks<'a>(user_data: *mut c_void) -> Option<&'a Arc<dyn RendererCallbacks>> {
    unsafe { user_data.cast::<Arc<dyn RendererCallbacks>>().as_ref() }
}

unsafe extern "C" fn make_current_trampoline(user_data: *mut c_void) -> bool {
    unsafe { callbacks(user_data) }.is_some_and(|c| c.make_current())
}

unsafe extern "C" fn clear_current_trampoline(user_data: *mut c_void) -> bool {
    unsafe { callbacks(user_data) }.is_some_and(|c| c.clear_current())
}

unsafe extern "C" fn present_trampoline(user_data: *mut c_void) -> bool {
    unsafe { callbacks(user_data) }.is_some_and(|c| c.present())
}

unsafe extern "C" fn fbo_trampoline(user_data: *mut c_void) -> u32 {
    unsafe { callbacks(user_data) }.map_or(0, |c| c.framebuffer())
}
