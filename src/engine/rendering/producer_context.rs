/// ### English
/// Producer-side GL context wrapper.
/// Owns the context created in the consumer's share group and skips redundant `make_current`
/// calls when it is already current on the calling thread.
///
/// ### 中文
/// 生产者侧 GL 上下文封装。
/// 持有在消费者共享组中创建的上下文；若已在调用线程上 current，则跳过多余的 `make_current`。
use std::sync::Arc;

use crate::engine::error::{BridgeError, Result};
use crate::engine::host::{ContextId, GlContext, HostSurface};

pub struct ProducerContext {
    context: Box<dyn GlContext>,
    host: Arc<dyn HostSurface>,
}

impl ProducerContext {
    /// ### English
    /// Creates a context sharing objects with `consumer`.
    ///
    /// ### 中文
    /// 创建一个与 `consumer` 共享对象的上下文。
    pub fn create(host: Arc<dyn HostSurface>, consumer: &dyn GlContext) -> Result<Self> {
        let context = host
            .create_producer_context(consumer)
            .map_err(BridgeError::ContextCreation)?;
        log::debug!(
            "created producer context {:?} sharing with {:?}",
            context.id(),
            consumer.id()
        );
        Ok(Self { context, host })
    }

    pub fn id(&self) -> ContextId {
        self.context.id()
    }

    pub fn is_current(&self) -> bool {
        self.host.current_context() == Some(self.context.id())
    }

    pub fn make_current(&self) -> bool {
        if self.is_current() {
            return true;
        }
        self.context.make_current()
    }
}
