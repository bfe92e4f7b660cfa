/// ### English
/// Frame-ready signaling between the engine raster thread (producer) and the toolkit paint
/// cycle (consumer): the owned GPU fence, the frame token, and the gate that carries it.
///
/// ### 中文
/// 引擎光栅线程（生产者）与工具包绘制周期（消费者）之间的帧就绪信号：自有 GPU fence、
/// 帧 token，以及承载它的关卡。
mod gate;
mod token;

pub use gate::{GateGuard, SynchronizationGate};
pub use token::{FrameToken, GpuFence};
