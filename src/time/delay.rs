use std::time::Duration;

use crate::task::Task;

/// Leaf task that is done once a fixed amount of frame time has elapsed.
///
/// Frame time is the sum of `dt` values received, which is not wall-clock
/// time: a paused or slowed tick source stretches the delay with it.
#[derive(Debug, Clone)]
pub struct Delay {
    /// Frame time left, in seconds. May go negative on the final step.
    remaining: f32,
}

impl Delay {
    /// Waits for `duration` of frame time.
    #[inline]
    pub fn new(duration: Duration) -> Self {
        Delay {
            remaining: duration.as_secs_f32(),
        }
    }

    /// Waits for `secs` seconds of frame time.
    #[inline]
    pub fn secs(secs: f32) -> Self {
        Delay { remaining: secs }
    }

    /// Frame time left before the delay is done, in seconds.
    pub fn remaining_secs(&self) -> f32 {
        self.remaining.max(0.0)
    }
}

impl Task for Delay {
    fn is_done(&self) -> bool {
        self.remaining <= 0.0
    }

    fn step(&mut self, dt: f32) {
        self.remaining -= dt;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulates_dt() {
        let mut delay = Delay::secs(0.05);

        assert!(!delay.is_done());
        delay.step(0.016);
        delay.step(0.016);
        assert!(!delay.is_done());
        delay.step(0.020);
        assert!(delay.is_done());
    }

    #[test]
    fn test_zero_duration_done_immediately() {
        let delay = Delay::new(Duration::ZERO);
        assert!(delay.is_done());
        assert_eq!(delay.remaining_secs(), 0.0);
    }

    #[test]
    fn test_remaining_clamps_at_zero() {
        let mut delay = Delay::secs(0.01);
        delay.step(1.0);
        assert!(delay.is_done());
        assert_eq!(delay.remaining_secs(), 0.0);
    }
}
