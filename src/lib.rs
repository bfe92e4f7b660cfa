/// ### English
/// `frame_bridge` crate root.
/// Hands frames rendered by an embedded engine on its own thread to a UI toolkit's paint
/// cycle through a shared-context GPU copy, a fence and a condition-variable gate.
/// The core lives under `engine`; `ffi` exports the C ABI.
///
/// ### 中文
/// `frame_bridge` 的 crate 根。
/// 通过共享上下文的 GPU 复制、fence 与条件变量关卡，把内嵌引擎在其自身线程上渲染的帧交给
/// UI 工具包的绘制周期。核心实现位于 `engine`；`ffi` 导出 C ABI。
pub mod engine;
pub mod ffi;
