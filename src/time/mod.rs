//! Frame-time utilities: leaf tasks that wait without doing work.
//!
//! Under a tick source there is no clock, only the stream of `dt` values the
//! source chooses to deliver. A paused game delivers nothing, a slow-motion
//! effect delivers less, and a fixed-step simulation delivers the same value
//! every frame. The tasks here therefore measure *frame time* (the running
//! sum of `dt`) or plain frame counts, never the wall clock.
//!
//! Both are most useful yielded out of a coroutine body, where they turn
//! into "pause this logic for a while" (see [`crate::coro`]).

mod delay;
pub use delay::Delay;

mod frames;
pub use frames::Frames;
