//! ### English
//! The single cross-thread gate between the producer (engine raster thread) and the consumer
//! (toolkit paint cycle).
//!
//! One mutex guards the ready token together with the resource both sides touch (the buffer
//! set), and one condition variable wakes the consumer when a token arrives. The condition
//! variable orders the threads on the CPU; the fence inside the token orders the copy on the
//! GPU.
//!
//! ### 中文
//! 生产者（引擎光栅线程）与消费者（工具包绘制周期）之间唯一的跨线程关卡。
//!
//! 一把互斥锁同时保护就绪 token 与双方都会访问的资源（buffer set），一个条件变量在 token
//! 到达时唤醒消费者。条件变量负责 CPU 侧的线程顺序；token 中的 fence 负责 GPU 侧复制的顺序。

use std::ops::{Deref, DerefMut};

use parking_lot::{Condvar, Mutex, MutexGuard};

use super::token::FrameToken;

struct GateSlot<T> {
    /// ### English
    /// `None` means "no frame ready since the last invalidation".
    ///
    /// ### 中文
    /// `None` 表示“自上次失效以来没有就绪帧”。
    token: Option<FrameToken>,
    closed: bool,
    last_seq: u64,
    resource: T,
}

/// ### English
/// Mutex-protected frame-ready token plus a wait/notify mechanism, guarding `T`.
///
/// ### 中文
/// 受互斥锁保护的帧就绪 token 及等待/通知机制，同时保护 `T`。
pub struct SynchronizationGate<T> {
    slot: Mutex<GateSlot<T>>,
    ready: Condvar,
}

impl<T> SynchronizationGate<T> {
    pub fn new(resource: T) -> Self {
        Self {
            slot: Mutex::new(GateSlot {
                token: None,
                closed: false,
                last_seq: 0,
                resource,
            }),
            ready: Condvar::new(),
        }
    }

    /// ### English
    /// Acquires the gate lock.
    ///
    /// ### 中文
    /// 获取关卡锁。
    pub fn lock(&self) -> GateGuard<'_, T> {
        GateGuard {
            slot: self.slot.lock(),
            ready: &self.ready,
        }
    }

    /// ### English
    /// Blocks until a token is present and returns with the lock held. The token is not
    /// cleared, so the same frame can be drawn again until a newer one replaces it.
    ///
    /// There is no timeout. Returns `None` only once the gate has been closed.
    ///
    /// ### 中文
    /// 阻塞直到 token 存在，并在持有锁的情况下返回。token 不会被清除，因此在被更新的帧替换前，
    /// 同一帧可被重复绘制。
    ///
    /// 不设超时。仅当关卡被关闭后才返回 `None`。
    pub fn wait_and_consume(&self) -> Option<GateGuard<'_, T>> {
        let mut slot = self.slot.lock();
        while slot.token.is_none() && !slot.closed {
            self.ready.wait(&mut slot);
        }
        if slot.closed {
            return None;
        }
        if let Some(token) = slot.token.as_ref() {
            log::trace!("consuming frame {}", token.seq());
        }
        Some(GateGuard {
            slot,
            ready: &self.ready,
        })
    }

    pub fn signal(&self, token: FrameToken) {
        self.lock().signal(token);
    }

    pub fn invalidate(&self) {
        self.lock().invalidate();
    }

    pub fn close(&self) {
        self.lock().close();
    }
}

/// ### English
/// Holds the gate lock. Dereferences to the guarded resource.
///
/// ### 中文
/// 持有关卡锁。可解引用为被保护的资源。
pub struct GateGuard<'a, T> {
    slot: MutexGuard<'a, GateSlot<T>>,
    ready: &'a Condvar,
}

impl<T> GateGuard<'_, T> {
    pub fn token(&self) -> Option<&FrameToken> {
        self.slot.token.as_ref()
    }

    pub fn is_closed(&self) -> bool {
        self.slot.closed
    }

    /// ### English
    /// Installs `token` (dropping any previous one, which deletes its fence) and wakes all
    /// waiters. A closed gate drops the token instead.
    ///
    /// ### 中文
    /// 安装 `token`（丢弃之前的 token，同时删除其 fence）并唤醒所有等待者。
    /// 已关闭的关卡会直接丢弃该 token。
    pub fn signal(&mut self, token: FrameToken) {
        if self.slot.closed {
            log::trace!("gate closed; dropping frame {}", token.seq());
            return;
        }
        log::trace!("frame {} ready", token.seq());
        self.slot.token = Some(token);
        self.ready.notify_all();
    }

    /// ### English
    /// Discards the current token without notifying. Returns whether one was present.
    ///
    /// ### 中文
    /// 丢弃当前 token 且不通知。返回之前是否存在 token。
    pub fn invalidate(&mut self) -> bool {
        self.slot.token.take().is_some()
    }

    pub fn notify_all(&self) {
        self.ready.notify_all();
    }

    /// ### English
    /// Discards the token, marks the gate closed and wakes every waiter.
    ///
    /// ### 中文
    /// 丢弃 token，标记关卡为关闭并唤醒所有等待者。
    pub fn close(&mut self) {
        self.slot.token = None;
        self.slot.closed = true;
        self.ready.notify_all();
    }

    /// ### English
    /// Allocates the next frame sequence number (wraps; 0 is reserved).
    ///
    /// ### 中文
    /// 分配下一个帧序号（会回绕；0 保留不用）。
    pub fn next_sequence(&mut self) -> u64 {
        let mut seq = self.slot.last_seq.wrapping_add(1);
        if seq == 0 {
            seq = 1;
        }
        self.slot.last_seq = seq;
        seq
    }
}

impl<T> Deref for GateGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.slot.resource
    }
}

impl<T> DerefMut for GateGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.slot.resource
    }
}
