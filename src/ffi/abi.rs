use std::ffi::c_char;

use crate::engine::input::PointerPhase;
use crate::engine::logging::{LoggingConfig, init_logging};

#[unsafe(no_mangle)]
/// ### English
/// Returns the C ABI version.
///
/// ### 中文
/// 返回 C ABI 版本号。
pub extern "C" fn frame_bridge_abi_version() -> u32 {
    super::FRAME_BRIDGE_ABI_VERSION
}

#[unsafe(no_mangle)]
pub extern "C" fn frame_bridge_pointer_phase_cancel() -> u32 {
    PointerPhase::Cancel as u32
}

#[unsafe(no_mangle)]
pub extern "C" fn frame_bridge_pointer_phase_up() -> u32 {
    PointerPhase::Up as u32
}

#[unsafe(no_mangle)]
pub extern "C" fn frame_bridge_pointer_phase_down() -> u32 {
    PointerPhase::Down as u32
}

#[unsafe(no_mangle)]
pub extern "C" fn frame_bridge_pointer_phase_move() -> u32 {
    PointerPhase::Move as u32
}

#[unsafe(no_mangle)]
/// ### English
/// Installs the crate's `env_logger` backend (first call wins).
///
/// `filter` is an optional `env_logger` filter string; NULL or empty falls back to
/// `RUST_LOG`, then `info`.
///
/// ### 中文
/// 安装本 crate 的 `env_logger` 后端（仅首次调用生效）。
///
/// `filter` 为可选的 `env_logger` 过滤字符串；NULL 或空字符串时回退到 `RUST_LOG`，
/// 再回退到 `info`。
pub unsafe extern "C" fn frame_bridge_init_logging(filter: *const c_char) {
    let env_filter = unsafe { super::cstr_to_string(filter) };
    init_logging(LoggingConfig {
        env_filter,
        ..LoggingConfig::default()
    });
}
