//! ### English
//! C ABI surface for `frame_bridge`.
//!
//! All exported symbols are `extern "C"` functions; structs are `#[repr(C)]`.
//! Strings passed in must be NUL-terminated UTF-8 (C string); they are validated as UTF-8
//! and truncated at the first NUL byte.
//!
//! ### 中文
//! `frame_bridge` 的 C ABI 接口层。
//!
//! 所有导出符号均为 `extern "C"` 函数；结构体使用 `#[repr(C)]`。
//! 传入的字符串必须是以 NUL 结尾的 UTF-8（C 字符串）；Rust 会校验 UTF-8，
//! 且在遇到第一个 NUL 字节处截断。
mod abi;
mod renderer;

use std::ffi::{CStr, c_char};

pub use renderer::{
    FrameBridgeOpenGlRendererConfig, release_renderer_user_data, renderer_user_data,
};

/// ### English
/// C ABI version for `frame_bridge`.
///
/// ### 中文
/// `frame_bridge` 的 C ABI 版本号。
const FRAME_BRIDGE_ABI_VERSION: u32 = 1;

/// ### English
/// Converts an optional NUL-terminated UTF-8 C string into an owned `String`.
///
/// Returns `None` for NULL pointers, invalid UTF-8, or empty strings.
///
/// # Safety
/// `ptr` must be valid and point to a NUL-terminated string for the duration of the call.
///
/// ### 中文
/// 将可选的 NUL 结尾 UTF-8 C 字符串转换为自有 `String`。
///
/// 对 NULL 指针、UTF-8 非法或空字符串返回 `None`。
///
/// # Safety
/// `ptr` 在本次调用期间必须有效，并指向以 NUL 结尾的字符串。
unsafe fn cstr_to_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }

    let value = unsafe { CStr::from_ptr(ptr) }.to_str().ok()?;
    if value.is_empty() {
        return None;
    }

    Some(value.to_owned())
}
