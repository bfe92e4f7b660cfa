use std::sync::atomic::Ordering;

use super::FrameHandoff;

impl FrameHandoff {
    /// ### English
    /// Closes the gate: any blocked `render` returns, later presents are rejected and the
    /// ready frame (with its fence) is dropped.
    ///
    /// ### 中文
    /// 关闭关卡：阻塞中的 `render` 会返回，之后的 present 会被拒绝，已就绪帧（及其 fence）
    /// 被丢弃。
    pub fn close(&self) {
        self.gate.close();
        log::debug!("frame gate closed");
    }

    /// ### English
    /// Closes the gate and deletes every GPU object (idempotent; safe before realize).
    ///
    /// Makes the producer context current on the calling thread for the deletes, since
    /// framebuffer objects are not shared between contexts, then restores whatever context
    /// was current before. Call after the engine has stopped using it.
    ///
    /// ### 中文
    /// 关闭关卡并删除所有 GPU 对象（幂等；realize 前调用也安全）。
    ///
    /// 删除期间让生产者上下文在调用线程上变为 current（framebuffer 对象不在上下文之间共享），
    /// 之后恢复调用前的 current 上下文。应在引擎停止使用该上下文之后调用。
    pub fn release(&self) {
        let mut buffers = self.gate.lock();
        buffers.close();
        if !buffers.is_allocated() {
            return;
        }

        let previous = self.host.current_context();
        let producer = self.producer.get();
        if let Some(producer) = producer {
            if !producer.make_current() {
                log::warn!("producer context unavailable during release");
            }
        }
        self.framebuffer.store(0, Ordering::Release);
        buffers.release(&*self.gl);

        if producer.is_some_and(|p| previous != Some(p.id()))
            && !self.host.restore_context(previous)
        {
            log::warn!("failed to restore context {previous:?} after release");
        }
        log::debug!("released surface buffers");
    }
}

impl Drop for FrameHandoff {
    fn drop(&mut self) {
        self.release();
    }
}
