use crate::pointer::PointerEvent;
use serde::{Deserialize, Serialize};

/// User-selected clip window over the fixed [0,1] score domain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClipRange {
    pub min: f32,
    pub max: f32,
}

impl Default for ClipRange {
    fn default() -> Self {
        Self { min: 0.0, max: 1.0 }
    }
}

impl ClipRange {
    pub fn span(&self) -> f32 {
        self.max - self.min
    }
}

/// Which thumb the active pointer owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RangeDrag {
    #[default]
    Idle,
    DraggingMin,
    DraggingMax,
}

/// Dual-thumb clip-range slider. `min <= max` is maintained by clamping the
/// moving thumb against the other one, never by reordering them: pushing a
/// thumb past its partner pins both to the same value.
#[derive(Debug, Clone, Default)]
pub struct RangeClipController {
    range: ClipRange,
    drag: RangeDrag,
}

impl RangeClipController {
    pub fn new(min: f32, max: f32) -> Self {
        let mut controller = Self::default();
        controller.set_min(min);
        controller.set_max(max);
        controller
    }

    pub fn range(&self) -> ClipRange {
        self.range
    }

    pub fn drag(&self) -> RangeDrag {
        self.drag
    }

    /// Grab the thumb whose value is nearer to the pointer (ties go to the
    /// min thumb) and apply the first update immediately.
    pub fn pointer_down(&mut self, fraction: f32) -> bool {
        let Some(f) = clamp01(fraction) else {
            return false;
        };

        let d_min = (f - self.range.min).abs();
        let d_max = (f - self.range.max).abs();
        self.drag = if d_min <= d_max {
            RangeDrag::DraggingMin
        } else {
            RangeDrag::DraggingMax
        };

        self.pointer_move(f)
    }

    /// Clamped update for the active thumb; a no-op while idle.
    pub fn pointer_move(&mut self, fraction: f32) -> bool {
        let Some(f) = clamp01(fraction) else {
            return false;
        };

        let before = self.range;
        match self.drag {
            RangeDrag::Idle => {}
            RangeDrag::DraggingMin => self.range.min = f.min(self.range.max),
            RangeDrag::DraggingMax => self.range.max = f.max(self.range.min),
        }
        self.range != before
    }

    pub fn pointer_up(&mut self) {
        self.drag = RangeDrag::Idle;
    }

    /// A cancelled pointer is treated like a release: updates were applied
    /// frame by frame, so there is nothing to roll back.
    pub fn pointer_cancel(&mut self) {
        self.pointer_up();
    }

    /// Typed value entry for the min field; same clamping as a drag.
    pub fn set_min(&mut self, value: f32) -> bool {
        let Some(v) = clamp01(value) else {
            return false;
        };

        let before = self.range.min;
        self.range.min = v.min(self.range.max);
        self.range.min != before
    }

    pub fn set_max(&mut self, value: f32) -> bool {
        let Some(v) = clamp01(value) else {
            return false;
        };

        let before = self.range.max;
        self.range.max = v.max(self.range.min);
        self.range.max != before
    }

    /// Feed one logical pointer event; returns whether the range changed.
    pub fn handle(&mut self, event: PointerEvent<f32>) -> bool {
        match event {
            PointerEvent::Down(f) => self.pointer_down(f),
            PointerEvent::Move(f) => self.pointer_move(f),
            PointerEvent::Up => {
                self.pointer_up();
                false
            }
            PointerEvent::Cancel => {
                self.pointer_cancel();
                false
            }
        }
    }
}

#[inline]
fn clamp01(f: f32) -> Option<f32> {
    if f.is_finite() {
        Some(f.clamp(0.0, 1.0))
    } else {
        None
    }
}
