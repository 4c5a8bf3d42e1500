//! The stepped-task protocol: the boundary between task implementations and
//! the tick source driving them.
//!
//! Everything a tick source needs to know about a unit of game logic fits in
//! three calls: ask whether it has finished, advance it by one frame's worth
//! of time, and tear it down when it ends. Anything implementing [`Task`]
//! can be driven by such a loop, and anything implementing it can also be
//! yielded out of a coroutine as a sub-task (see [`crate::coro`]).

use std::cell::RefCell;
use std::rc::Rc;

/// A unit of game logic advanced once per frame by an external tick source.
pub trait Task {
    /// Returns `true` once the task has finished its work.
    ///
    /// Idempotent and free of side effects; the tick source may call it any
    /// number of times between steps.
    fn is_done(&self) -> bool;

    /// Advances the task by `dt` seconds of frame time.
    ///
    /// Called at most once per external tick while the task is not done.
    fn step(&mut self, dt: f32);

    /// Tears the task down.
    ///
    /// The tick source calls this at most once when the task ends, whether
    /// by natural completion or by cancellation. The default implementation
    /// does nothing.
    fn stop(&mut self) {}
}

/// Shared handle to a [`Task`] for single-threaded contexts.
///
/// Sub-tasks cross the coroutine yield boundary as reference-counted
/// handles: the suspended frame retains one owner for as long as it intends
/// to consult the task, while the surrounding tick source may hold another.
pub type TaskHandle = Rc<RefCell<dyn Task>>;

/// Wraps `task` in a fresh [`TaskHandle`].
pub fn handle<T: Task + 'static>(task: T) -> TaskHandle {
    Rc::new(RefCell::new(task))
}
