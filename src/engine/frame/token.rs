use std::sync::Arc;

use dpi::PhysicalSize;

use crate::engine::gl::{FenceHandle, GlApi};

/// ### English
/// An owned GPU fence, deleted exactly once when dropped.
///
/// ### 中文
/// 自有的 GPU fence，drop 时恰好删除一次。
pub struct GpuFence {
    handle: FenceHandle,
    gl: Arc<dyn GlApi>,
}

impl GpuFence {
    /// ### English
    /// Inserts a "commands complete" fence into the current context's command stream.
    ///
    /// ### 中文
    /// 在当前上下文的命令流中插入“命令完成” fence。
    pub fn insert(gl: &Arc<dyn GlApi>) -> Option<Self> {
        let handle = gl.fence_sync().filter(|h| !h.is_null())?;
        Some(Self {
            handle,
            gl: gl.clone(),
        })
    }

    pub fn handle(&self) -> FenceHandle {
        self.handle
    }

    pub fn is_signaled(&self) -> bool {
        self.gl.fence_signaled(self.handle)
    }
}

impl Drop for GpuFence {
    fn drop(&mut self) {
        self.gl.delete_sync(self.handle);
    }
}

impl std::fmt::Debug for GpuFence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("GpuFence").field(&self.handle.0).finish()
    }
}

/// ### English
/// "A frame is ready": the fence marking the front-buffer copy as complete, plus the
/// frame's sequence number and the allocation it was produced at.
///
/// ### 中文
/// “帧已就绪”：标记前缓冲复制完成的 fence，以及帧序号和生成该帧时的尺寸。
#[derive(Debug)]
pub struct FrameToken {
    fence: GpuFence,
    /// ### English
    /// Monotonic frame sequence number (wraps; 0 is reserved).
    ///
    /// ### 中文
    /// 单调递增帧序号（会回绕；0 保留不用）。
    seq: u64,
    size: PhysicalSize<u32>,
}

impl FrameToken {
    pub fn new(fence: GpuFence, seq: u64, size: PhysicalSize<u32>) -> Self {
        Self { fence, seq, size }
    }

    pub fn fence(&self) -> &GpuFence {
        &self.fence
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testing::MockGl;

    #[test]
    fn fence_is_deleted_once_on_drop() {
        let mock = Arc::new(MockGl::new());
        let gl: Arc<dyn GlApi> = mock.clone();

        let fence = GpuFence::insert(&gl).expect("fence");
        assert_eq!(mock.live_fences(), 1);
        assert!(!fence.is_signaled());
        gl.finish();
        assert!(fence.is_signaled());

        drop(FrameToken::new(fence, 1, PhysicalSize::new(2, 2)));
        assert_eq!(mock.live_fences(), 0);
        assert_eq!(mock.double_frees(), 0);
    }

    #[test]
    fn fence_signals_only_when_its_own_thread_finishes() {
        let mock = Arc::new(MockGl::new());
        let gl: Arc<dyn GlApi> = mock.clone();

        let fence = std::thread::spawn({
            let gl = gl.clone();
            move || GpuFence::insert(&gl).expect("fence")
        })
        .join()
        .expect("producer");
        gl.finish();
        assert!(!fence.is_signaled());
        drop(fence);
        assert_eq!(mock.live_fences(), 0);
    }

    #[test]
    fn refused_fence_yields_none() {
        let mock = Arc::new(MockGl::new());
        let gl: Arc<dyn GlApi> = mock.clone();
        mock.fail_next_fence();
        assert!(GpuFence::insert(&gl).is_none());
        assert!(GpuFence::insert(&gl).is_some());
    }
}
