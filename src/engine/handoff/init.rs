use std::sync::atomic::Ordering;

use dpi::PhysicalSize;

use crate::engine::error::{BridgeError, Result};
use crate::engine::host::GlContext;
use crate::engine::rendering::ProducerContext;

use super::FrameHandoff;

impl FrameHandoff {
    /// ### English
    /// Creates the producer context in `consumer`'s share group and allocates the buffers at
    /// `size` with it. `consumer` is made current again before returning.
    ///
    /// Must run on the toolkit thread before the engine starts.
    ///
    /// ### 中文
    /// 在 `consumer` 的共享组中创建生产者上下文，并用它以 `size` 分配缓冲。返回前会重新使
    /// `consumer` 成为 current。
    ///
    /// 必须在引擎启动前于工具包线程调用。
    pub fn realize(&self, consumer: &dyn GlContext, size: PhysicalSize<u32>) -> Result<()> {
        if self.is_realized() {
            return Err(BridgeError::AlreadyRealized);
        }
        if size.width == 0 || size.height == 0 {
            return Err(BridgeError::InvalidAllocation {
                width: size.width,
                height: size.height,
            });
        }

        let producer = ProducerContext::create(self.host.clone(), consumer)?;
        if !producer.make_current() {
            return Err(BridgeError::ContextNotCurrent);
        }

        let allocated = {
            let mut buffers = self.gate.lock();
            let result = buffers.allocate(&*self.gl, size);
            result.map(|()| buffers.target().framebuffer)
        };
        consumer.make_current();
        let framebuffer = allocated?;

        self.framebuffer.store(framebuffer, Ordering::Release);
        if self.producer.set(producer).is_err() {
            return Err(BridgeError::AlreadyRealized);
        }
        log::debug!(
            "realized surface {}x{} (producer fbo {framebuffer})",
            size.width,
            size.height
        );
        Ok(())
    }
}
