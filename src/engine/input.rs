//! ### English
//! Pointer events and the press/release debounce applied before they reach the engine.
//!
//! ### 中文
//! 指针事件，以及在送达引擎前应用的按下/抬起去抖。

/// ### English
/// Pointer phase as understood by the engine.
///
/// ### 中文
/// 引擎所理解的指针阶段。
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerPhase {
    Cancel = 0,
    Up = 1,
    Down = 2,
    Move = 3,
}

impl PointerPhase {
    /// ### English
    /// Decodes a raw ABI value (see `frame_bridge_pointer_phase_*`).
    ///
    /// ### 中文
    /// 解码 ABI 原始值（见 `frame_bridge_pointer_phase_*`）。
    pub fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            0 => Some(Self::Cancel),
            1 => Some(Self::Up),
            2 => Some(Self::Down),
            3 => Some(Self::Move),
            _ => None,
        }
    }
}

/// ### English
/// One pointer event in surface coordinates (physical pixels).
///
/// ### 中文
/// 表面坐标系（物理像素）中的单个指针事件。
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub x: f64,
    pub y: f64,
    /// ### English
    /// Event time in microseconds, as stamped by the toolkit.
    ///
    /// ### 中文
    /// 工具包标记的事件时间（微秒）。
    pub timestamp_micros: u64,
}

/// ### English
/// Debounces pointer phases delivered by the toolkit.
///
/// The toolkit occasionally delivers duplicate presses/releases; the engine rejects a second
/// `Down` without an `Up` in between. Only one pointer is tracked.
///
/// ### 中文
/// 对工具包投递的指针阶段去抖。
///
/// 工具包偶尔会重复投递按下/抬起；引擎会拒绝中间没有 `Up` 的第二个 `Down`。仅跟踪单个指针。
#[derive(Debug, Default)]
pub struct PointerDispatcher {
    /// ### English
    /// Whether a `Down` has been forwarded without a matching `Up`/`Cancel`.
    ///
    /// ### 中文
    /// 是否已转发 `Down` 且尚未有对应的 `Up`/`Cancel`。
    down: bool,
}

impl PointerDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_down(&self) -> bool {
        self.down
    }

    /// ### English
    /// Returns the event to forward, or `None` if it must be suppressed.
    ///
    /// - `Down`: only when not already down.
    /// - `Up`: only when down.
    /// - `Move`: only while down (hover motion is not forwarded).
    /// - `Cancel`: only while down; ends the press.
    ///
    /// ### 中文
    /// 返回需要转发的事件；若需抑制则返回 `None`。
    ///
    /// - `Down`：仅在未按下时转发。
    /// - `Up`：仅在已按下时转发。
    /// - `Move`：仅在按下期间转发（悬停移动不转发）。
    /// - `Cancel`：仅在按下期间转发；结束本次按下。
    pub fn filter(&mut self, event: PointerEvent) -> Option<PointerEvent> {
        match event.phase {
            PointerPhase::Down => {
                if self.down {
                    return None;
                }
                self.down = true;
            }
            PointerPhase::Up | PointerPhase::Cancel => {
                if !self.down {
                    return None;
                }
                self.down = false;
            }
            PointerPhase::Move => {
                if !self.down {
                    return None;
                }
            }
        }
        Some(event)
    }

    /// ### English
    /// Forgets any press in progress (used on teardown).
    ///
    /// ### 中文
    /// 清除进行中的按下状态（用于销毁时）。
    pub fn reset(&mut self) {
        self.down = false;
    }
}
