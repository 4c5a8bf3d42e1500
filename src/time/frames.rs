use crate::task::Task;

/// Leaf task that is done after receiving a fixed number of steps.
///
/// `Frames::new(0)` is done from the start; yielding it out of a coroutine
/// pauses the body for exactly one frame.
#[derive(Debug, Clone)]
pub struct Frames {
    remaining: u32,
}

impl Frames {
    /// Waits for `count` steps.
    #[inline]
    pub fn new(count: u32) -> Self {
        Frames { remaining: count }
    }

    /// Steps left before the task is done.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }
}

impl Task for Frames {
    fn is_done(&self) -> bool {
        self.remaining == 0
    }

    fn step(&mut self, _dt: f32) {
        self.remaining = self.remaining.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_down() {
        let mut frames = Frames::new(2);

        assert!(!frames.is_done());
        frames.step(0.016);
        assert_eq!(frames.remaining(), 1);
        frames.step(0.016);
        assert!(frames.is_done());
    }

    #[test]
    fn test_zero_frames_done_immediately() {
        assert!(Frames::new(0).is_done());
    }

    #[test]
    fn test_step_past_zero_saturates() {
        let mut frames = Frames::new(1);
        frames.step(0.016);
        frames.step(0.016);
        assert!(frames.is_done());
        assert_eq!(frames.remaining(), 0);
    }
}
