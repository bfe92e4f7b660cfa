//! Test doubles for the GL backend, the host toolkit and the embedded engine.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::thread::{self, ThreadId};

use dpi::PhysicalSize;
use parking_lot::Mutex;

use super::config::EngineParams;
use super::gl::{FenceHandle, GL_NO_ERROR, GlApi, GlName};
use super::host::{
    ContextId, EmbeddedEngine, GlContext, HostSurface, RendererCallbacks, WindowMetrics,
};
use super::input::PointerEvent;

pub(crate) const GL_INVALID_VALUE: u32 = 0x0501;

#[derive(Clone, Copy, Default)]
struct Bindings {
    texture: GlName,
    renderbuffer: GlName,
    framebuffer: GlName,
}

#[derive(Clone, Copy)]
struct MockTexture {
    size: PhysicalSize<u32>,
    contents: Option<u64>,
    /// Thread whose unfinished command last wrote this texture.
    pending: Option<ThreadId>,
}

#[derive(Clone, Copy, Default)]
struct MockFramebuffer {
    color: GlName,
    depth: GlName,
}

/// One `draw_texture` call as observed by the GPU.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Draw {
    pub texture: GlName,
    pub contents: Option<u64>,
    pub pending: bool,
    pub source: PhysicalSize<u32>,
    pub target: PhysicalSize<u32>,
}

#[derive(Clone, Copy)]
struct MockFence {
    issuer: ThreadId,
    signaled: bool,
}

#[derive(Default)]
struct GlState {
    next_name: GlName,
    next_fence: u64,
    bindings: HashMap<ThreadId, Bindings>,
    textures: HashMap<GlName, MockTexture>,
    renderbuffers: HashMap<GlName, Option<PhysicalSize<u32>>>,
    framebuffers: HashMap<GlName, MockFramebuffer>,
    fences: HashMap<u64, MockFence>,
    fences_created: usize,
    double_frees: usize,
    error: u32,
    fail_next_fence: bool,
    draws: Vec<Draw>,
    finishes: usize,
}

impl GlState {
    fn bindings(&mut self) -> &mut Bindings {
        self.bindings.entry(thread::current().id()).or_default()
    }

    fn name(&mut self) -> GlName {
        self.next_name += 1;
        self.next_name
    }
}

/// GPU model with per-thread bindings (one context per thread) and shared objects.
///
/// Writes and fences belong to the thread that issued them: only a `finish` on that same
/// thread completes the writes and signals the fences. A `finish` on the consumer thread
/// cannot cover for a producer that skipped its own.
pub(crate) struct MockGl {
    state: Mutex<GlState>,
}

impl MockGl {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(GlState {
                // Leave low names free for toolkit-owned framebuffers in tests.
                next_name: 100,
                ..GlState::default()
            }),
        }
    }

    /// Simulates the engine drawing `frame` into `framebuffer`.
    pub fn paint(&self, framebuffer: GlName, frame: u64) {
        let mut state = self.state.lock();
        let color = state
            .framebuffers
            .get(&framebuffer)
            .map(|fb| fb.color)
            .unwrap_or(0);
        if let Some(texture) = state.textures.get_mut(&color) {
            texture.contents = Some(frame);
            texture.pending = Some(thread::current().id());
        }
    }

    pub fn texture_size(&self, texture: GlName) -> Option<PhysicalSize<u32>> {
        self.state.lock().textures.get(&texture).map(|t| t.size)
    }

    pub fn texture_contents(&self, texture: GlName) -> Option<u64> {
        self.state
            .lock()
            .textures
            .get(&texture)
            .and_then(|t| t.contents)
    }

    pub fn renderbuffer_size(&self, renderbuffer: GlName) -> Option<PhysicalSize<u32>> {
        self.state
            .lock()
            .renderbuffers
            .get(&renderbuffer)
            .copied()
            .flatten()
    }

    pub fn color_attachment(&self, framebuffer: GlName) -> GlName {
        self.state
            .lock()
            .framebuffers
            .get(&framebuffer)
            .map(|fb| fb.color)
            .unwrap_or(0)
    }

    pub fn depth_attachment(&self, framebuffer: GlName) -> GlName {
        self.state
            .lock()
            .framebuffers
            .get(&framebuffer)
            .map(|fb| fb.depth)
            .unwrap_or(0)
    }

    pub fn live_objects(&self) -> usize {
        let state = self.state.lock();
        state.textures.len() + state.renderbuffers.len() + state.framebuffers.len()
    }

    pub fn live_fences(&self) -> usize {
        self.state.lock().fences.len()
    }

    pub fn fences_created(&self) -> usize {
        self.state.lock().fences_created
    }

    pub fn double_frees(&self) -> usize {
        self.state.lock().double_frees
    }

    pub fn finishes(&self) -> usize {
        self.state.lock().finishes
    }

    pub fn draws(&self) -> Vec<Draw> {
        self.state.lock().draws.clone()
    }

    pub fn last_draw(&self) -> Option<Draw> {
        self.state.lock().draws.last().copied()
    }

    pub fn inject_error(&self, code: u32) {
        self.state.lock().error = code;
    }

    pub fn fail_next_fence(&self) {
        self.state.lock().fail_next_fence = true;
    }
}

impl GlApi for MockGl {
    fn gen_texture(&self) -> Result<GlName, String> {
        let mut state = self.state.lock();
        let name = state.name();
        state.textures.insert(
            name,
            MockTexture {
                size: PhysicalSize::new(0, 0),
                contents: None,
                pending: None,
            },
        );
        Ok(name)
    }

    fn gen_renderbuffer(&self) -> Result<GlName, String> {
        let mut state = self.state.lock();
        let name = state.name();
        state.renderbuffers.insert(name, None);
        Ok(name)
    }

    fn gen_framebuffer(&self) -> Result<GlName, String> {
        let mut state = self.state.lock();
        let name = state.name();
        state.framebuffers.insert(name, MockFramebuffer::default());
        Ok(name)
    }

    fn delete_texture(&self, texture: GlName) {
        let mut state = self.state.lock();
        if texture != 0 && state.textures.remove(&texture).is_none() {
            state.double_frees += 1;
        }
    }

    fn delete_renderbuffer(&self, renderbuffer: GlName) {
        let mut state = self.state.lock();
        if renderbuffer != 0 && state.renderbuffers.remove(&renderbuffer).is_none() {
            state.double_frees += 1;
        }
    }

    fn delete_framebuffer(&self, framebuffer: GlName) {
        let mut state = self.state.lock();
        if framebuffer != 0 && state.framebuffers.remove(&framebuffer).is_none() {
            state.double_frees += 1;
        }
    }

    fn bind_texture(&self, texture: GlName) {
        self.state.lock().bindings().texture = texture;
    }

    fn bind_renderbuffer(&self, renderbuffer: GlName) {
        self.state.lock().bindings().renderbuffer = renderbuffer;
    }

    fn bind_framebuffer(&self, framebuffer: GlName) {
        self.state.lock().bindings().framebuffer = framebuffer;
    }

    fn texture_binding(&self) -> GlName {
        self.state.lock().bindings().texture
    }

    fn renderbuffer_binding(&self) -> GlName {
        self.state.lock().bindings().renderbuffer
    }

    fn draw_framebuffer_binding(&self) -> GlName {
        self.state.lock().bindings().framebuffer
    }

    fn allocate_texture(&self, size: PhysicalSize<u32>) {
        let mut state = self.state.lock();
        let bound = state.bindings().texture;
        if let Some(texture) = state.textures.get_mut(&bound) {
            *texture = MockTexture {
                size,
                contents: None,
                pending: None,
            };
        }
    }

    fn allocate_depth_storage(&self, size: PhysicalSize<u32>) {
        let mut state = self.state.lock();
        let bound = state.bindings().renderbuffer;
        if let Some(storage) = state.renderbuffers.get_mut(&bound) {
            *storage = Some(size);
        }
    }

    fn attach_color_texture(&self, texture: GlName) {
        let mut state = self.state.lock();
        let bound = state.bindings().framebuffer;
        if let Some(fb) = state.framebuffers.get_mut(&bound) {
            fb.color = texture;
        }
    }

    fn attach_depth_renderbuffer(&self, renderbuffer: GlName) {
        let mut state = self.state.lock();
        let bound = state.bindings().framebuffer;
        if let Some(fb) = state.framebuffers.get_mut(&bound) {
            fb.depth = renderbuffer;
        }
    }

    fn copy_framebuffer_to_texture(&self, size: PhysicalSize<u32>) {
        let mut guard = self.state.lock();
        let state = &mut *guard;
        let Bindings {
            texture: dest,
            framebuffer,
            ..
        } = *state.bindings();
        let source = state
            .framebuffers
            .get(&framebuffer)
            .and_then(|fb| state.textures.get(&fb.color))
            .copied();
        let Some(source) = source else {
            state.error = GL_INVALID_VALUE;
            return;
        };
        let Some(dest) = state.textures.get_mut(&dest) else {
            state.error = GL_INVALID_VALUE;
            return;
        };
        let fits = |s: PhysicalSize<u32>| size.width <= s.width && size.height <= s.height;
        if !fits(source.size) || !fits(dest.size) {
            state.error = GL_INVALID_VALUE;
            return;
        }
        dest.contents = source.contents;
        dest.pending = Some(thread::current().id());
    }

    fn draw_texture(
        &self,
        texture: GlName,
        source: PhysicalSize<u32>,
        target: PhysicalSize<u32>,
    ) -> Result<(), String> {
        let mut state = self.state.lock();
        let Some(sampled) = state.textures.get(&texture).copied() else {
            return Err(format!("texture {texture} does not exist"));
        };
        state.draws.push(Draw {
            texture,
            contents: sampled.contents,
            pending: sampled.pending.is_some(),
            source,
            target,
        });
        Ok(())
    }

    fn get_error(&self) -> u32 {
        std::mem::replace(&mut self.state.lock().error, GL_NO_ERROR)
    }

    fn finish(&self) {
        let me = thread::current().id();
        let mut state = self.state.lock();
        state.finishes += 1;
        for texture in state.textures.values_mut() {
            if texture.pending == Some(me) {
                texture.pending = None;
            }
        }
        for fence in state.fences.values_mut() {
            if fence.issuer == me {
                fence.signaled = true;
            }
        }
    }

    fn fence_sync(&self) -> Option<FenceHandle> {
        let mut state = self.state.lock();
        if std::mem::take(&mut state.fail_next_fence) {
            return None;
        }
        state.next_fence += 1;
        let handle = state.next_fence;
        state.fences.insert(
            handle,
            MockFence {
                issuer: thread::current().id(),
                signaled: false,
            },
        );
        state.fences_created += 1;
        Some(FenceHandle(handle))
    }

    fn delete_sync(&self, fence: FenceHandle) {
        let mut state = self.state.lock();
        if state.fences.remove(&fence.0).is_none() {
            state.double_frees += 1;
        }
    }

    fn fence_signaled(&self, fence: FenceHandle) -> bool {
        self.state
            .lock()
            .fences
            .get(&fence.0)
            .is_some_and(|f| f.signaled)
    }
}

struct HostShared {
    current: Mutex<HashMap<ThreadId, ContextId>>,
    next_context: AtomicU64,
    renders_queued: AtomicUsize,
    fail_producer_context: AtomicBool,
}

/// Toolkit double: tracks which context is current on each thread and counts repaint
/// requests.
pub(crate) struct MockHost {
    shared: Arc<HostShared>,
}

pub(crate) const CONSUMER_CONTEXT: ContextId = ContextId(1);

impl MockHost {
    pub fn new() -> Self {
        Self {
            shared: Arc::new(HostShared {
                current: Mutex::new(HashMap::new()),
                next_context: AtomicU64::new(CONSUMER_CONTEXT.0 + 1),
                renders_queued: AtomicUsize::new(0),
                fail_producer_context: AtomicBool::new(false),
            }),
        }
    }

    pub fn consumer_context(&self) -> MockContext {
        MockContext {
            id: CONSUMER_CONTEXT,
            shared: self.shared.clone(),
        }
    }

    pub fn renders_queued(&self) -> usize {
        self.shared.renders_queued.load(Ordering::SeqCst)
    }

    pub fn fail_producer_context(&self) {
        self.shared
            .fail_producer_context
            .store(true, Ordering::SeqCst);
    }
}

impl HostSurface for MockHost {
    fn create_producer_context(
        &self,
        _consumer: &dyn GlContext,
    ) -> Result<Box<dyn GlContext>, String> {
        if self.shared.fail_producer_context.load(Ordering::SeqCst) {
            return Err("no GL support on this display".to_string());
        }
        let id = self.shared.next_context.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MockContext {
            id: ContextId(id),
            shared: self.shared.clone(),
        }))
    }

    fn current_context(&self) -> Option<ContextId> {
        self.shared
            .current
            .lock()
            .get(&thread::current().id())
            .copied()
    }

    fn restore_context(&self, context: Option<ContextId>) -> bool {
        let mut current = self.shared.current.lock();
        match context {
            Some(id) => current.insert(thread::current().id(), id),
            None => current.remove(&thread::current().id()),
        };
        true
    }

    fn queue_render(&self) {
        self.shared.renders_queued.fetch_add(1, Ordering::SeqCst);
    }
}

pub(crate) struct MockContext {
    id: ContextId,
    shared: Arc<HostShared>,
}

impl GlContext for MockContext {
    fn make_current(&self) -> bool {
        self.shared
            .current
            .lock()
            .insert(thread::current().id(), self.id);
        true
    }

    fn id(&self) -> ContextId {
        self.id
    }
}

/// Everything the bridge told the engine.
#[derive(Default)]
pub(crate) struct EngineLog {
    pub params: Option<EngineParams>,
    pub callbacks: Option<Arc<dyn RendererCallbacks>>,
    pub metrics: Vec<WindowMetrics>,
    pub pointer_events: Vec<PointerEvent>,
    pub shutdowns: usize,
}

pub(crate) struct MockEngine {
    log: Arc<Mutex<EngineLog>>,
    fail_run: bool,
}

impl MockEngine {
    pub fn new() -> (Self, Arc<Mutex<EngineLog>>) {
        let log = Arc::new(Mutex::new(EngineLog::default()));
        (
            Self {
                log: log.clone(),
                fail_run: false,
            },
            log,
        )
    }

    pub fn failing() -> (Self, Arc<Mutex<EngineLog>>) {
        let (mut engine, log) = Self::new();
        engine.fail_run = true;
        (engine, log)
    }
}

impl EmbeddedEngine for MockEngine {
    fn run(
        &mut self,
        params: &EngineParams,
        callbacks: Arc<dyn RendererCallbacks>,
    ) -> Result<(), String> {
        if self.fail_run {
            return Err("kInvalidArguments".to_string());
        }
        let mut log = self.log.lock();
        log.params = Some(params.clone());
        log.callbacks = Some(callbacks);
        Ok(())
    }

    fn send_window_metrics(&mut self, metrics: WindowMetrics) -> bool {
        self.log.lock().metrics.push(metrics);
        true
    }

    fn send_pointer_event(&mut self, event: PointerEvent) -> bool {
        self.log.lock().pointer_events.push(event);
        true
    }

    fn shutdown(&mut self) {
        let mut log = self.log.lock();
        log.callbacks = None;
        log.shutdowns += 1;
    }
}
