/// ### English
/// Engine-side modules (GPU seam, frame gate, buffers, handoff pipelines, and the bridge).
///
/// ### 中文
/// 引擎侧模块（GPU 接缝、帧关卡、缓冲、交接管线以及 bridge）。
pub mod bridge;
pub mod config;
pub mod error;
pub mod frame;
pub mod gl;
pub mod handoff;
pub mod host;
pub mod input;
pub mod logging;
pub mod rendering;

#[cfg(test)]
pub(crate) mod testing;

pub use bridge::EngineBridge;
pub use config::{BridgeConfig, EngineParams};
pub use error::{BridgeError, Result};
pub use gl::{GlApi, GlowApi};
pub use handoff::FrameHandoff;
pub use host::{EmbeddedEngine, GlContext, HostSurface, RendererCallbacks, WindowMetrics};
pub use input::{PointerEvent, PointerPhase};
