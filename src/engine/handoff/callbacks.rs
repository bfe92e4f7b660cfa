use std::sync::atomic::Ordering;

use crate::engine::gl::GlName;
use crate::engine::host::RendererCallbacks;

use super::FrameHandoff;

impl RendererCallbacks for FrameHandoff {
    fn make_current(&self) -> bool {
        match self.producer.get() {
            Some(producer) => producer.make_current(),
            None => {
                log::warn!("make_current before realize");
                false
            }
        }
    }

    /// ### English
    /// No-op: releasing the context here would also detach the toolkit's context on some
    /// platforms.
    ///
    /// ### 中文
    /// 空操作：在某些平台上此处释放上下文也会解除工具包上下文的绑定。
    fn clear_current(&self) -> bool {
        true
    }

    fn present(&self) -> bool {
        FrameHandoff::present(self)
    }

    fn framebuffer(&self) -> GlName {
        self.framebuffer.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use dpi::PhysicalSize;

    use super::*;
    use crate::engine::host::{GlContext, HostSurface};
    use crate::engine::testing::{MockGl, MockHost};

    #[test]
    fn callbacks_before_realize() {
        let handoff = FrameHandoff::new(Arc::new(MockGl::new()), Arc::new(MockHost::new()));
        assert!(!handoff.make_current());
        assert!(handoff.clear_current());
        assert_eq!(handoff.framebuffer(), 0);
    }

    #[test]
    fn framebuffer_query_has_no_side_effects() {
        let gl = Arc::new(MockGl::new());
        let host = Arc::new(MockHost::new());
        let handoff = FrameHandoff::new(gl.clone(), host.clone());
        handoff
            .realize(&host.consumer_context(), PhysicalSize::new(4, 4))
            .expect("realize");

        let context = host.current_context();
        let fbo = handoff.framebuffer();
        assert_ne!(fbo, 0);
        assert_eq!(handoff.framebuffer(), fbo);
        assert_eq!(host.current_context(), context);
        assert_eq!(gl.color_attachment(fbo), handoff.gate.lock().target().color_texture);
    }

    #[test]
    fn make_current_switches_to_producer() {
        let host = Arc::new(MockHost::new());
        let handoff = FrameHandoff::new(Arc::new(MockGl::new()), host.clone());
        let consumer = host.consumer_context();
        handoff
            .realize(&consumer, PhysicalSize::new(4, 4))
            .expect("realize");
        assert_eq!(host.current_context(), Some(consumer.id()));

        assert!(handoff.make_current());
        assert_ne!(host.current_context(), Some(consumer.id()));
        assert!(handoff.clear_current());
        assert_ne!(host.current_context(), Some(consumer.id()));
    }
}
