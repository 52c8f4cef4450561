use serde::{Deserialize, Serialize};

use super::widget::Bounds;

/// Identifies one running periodic timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnimationHandle(u32);

impl AnimationHandle {
    pub fn from_id(id: u32) -> Self {
        Self(id)
    }

    pub fn id(self) -> u32 {
        self.0
    }
}

/// A toggle that drives a slider forward on every tick while it is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationSpec {
    pub toggle: &'static str,
    pub target: &'static str,
}

/// Instructions for the host timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AnimationEvent {
    Started {
        handle: AnimationHandle,
        interval_ms: u32,
        replaced: Option<AnimationHandle>,
    },
    Stopped {
        handle: AnimationHandle,
    },
}

/// Holds at most one live handle per dashboard.
#[derive(Debug, Clone, Default)]
pub struct Animator {
    active: Option<AnimationHandle>,
    next_id: u32,
}

impl Animator {
    /// Issues a fresh handle; any previous one is returned and no longer current.
    pub fn start(&mut self) -> (AnimationHandle, Option<AnimationHandle>) {
        self.next_id = self.next_id.wrapping_add(1);
        let handle = AnimationHandle(self.next_id);
        let replaced = self.active.replace(handle);
        (handle, replaced)
    }

    pub fn stop(&mut self) -> Option<AnimationHandle> {
        self.active.take()
    }

    pub fn active(&self) -> Option<AnimationHandle> {
        self.active
    }

    pub fn is_current(&self, handle: AnimationHandle) -> bool {
        self.active == Some(handle)
    }
}

/// Next value of an animated slider, wrapping to the start past the end.
pub fn advance(value: f64, bounds: Bounds) -> f64 {
    if value >= bounds.end {
        bounds.start
    } else {
        (value + bounds.step).min(bounds.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_replaces_previous_handle() {
        let mut animator = Animator::default();
        let (first, replaced) = animator.start();
        assert_eq!(replaced, None);

        let (second, replaced) = animator.start();
        assert_eq!(replaced, Some(first));
        assert_ne!(first, second);
        assert!(animator.is_current(second));
        assert!(!animator.is_current(first));

        assert_eq!(animator.stop(), Some(second));
        assert!(!animator.is_current(second));
    }

    #[test]
    fn advance_wraps_at_end() {
        let bounds = Bounds::new(0.0, 1.0, 0.25);
        assert_eq!(advance(0.5, bounds), 0.75);
        assert_eq!(advance(0.9, bounds), 1.0);
        assert_eq!(advance(1.0, bounds), 0.0);
    }
}
