use std::fmt;

use tracing::trace;

use crate::coro::Coroutine;
use crate::task::{Task, TaskHandle};

/// Adapter that lets a [`Coroutine`] run inside an ordinary tick loop.
///
/// Each [`step`] advances the composite by exactly one action: if the last
/// yielded sub-task is still running, the tick is forwarded to it;
/// otherwise the coroutine body is resumed. A sub-task yielded this tick
/// therefore receives its first delta on the *next* tick, which keeps
/// frame-counting sub-tasks exact.
///
/// ```
/// use std::time::Duration;
///
/// use koru::coro::CoroTask;
/// use koru::task::{Task, handle};
/// use koru::time::Delay;
///
/// let mut task = CoroTask::new(vec![handle(Delay::new(Duration::from_millis(32)))]);
///
/// let mut frames = 0;
/// while !task.is_done() {
///     task.step(1.0 / 60.0);
///     frames += 1;
/// }
///
/// // One resume to yield the delay, two ticks of 16.7ms to burn it down,
/// // and one final resume to observe the body's return.
/// assert_eq!(frames, 4);
/// ```
///
/// [`step`]: Task::step
pub struct CoroTask {
    coro: Coroutine,
    callback: Option<Box<dyn FnOnce()>>,
    stopped: bool,
}

impl CoroTask {
    /// Creates a task driving a fresh coroutine with the given body.
    ///
    /// Shorthand for [`with_coroutine`]`(Coroutine::new(body))`.
    ///
    /// [`with_coroutine`]: CoroTask::with_coroutine
    #[inline]
    pub fn new<B>(body: B) -> Self
    where
        B: IntoIterator<Item = TaskHandle>,
        B::IntoIter: 'static,
    {
        Self::with_coroutine(Coroutine::new(body))
    }

    /// Wraps an existing coroutine, which may already have been partially
    /// advanced by hand. A pending sub-task from an earlier resume is
    /// honored: it finishes before the body is resumed again.
    #[inline]
    pub fn with_coroutine(coro: Coroutine) -> Self {
        Self {
            coro,
            callback: None,
            stopped: false,
        }
    }

    /// Registers a callback to run when the task is stopped.
    ///
    /// The callback fires at most once, on the first [`stop`]; it does not
    /// fire on ordinary completion.
    ///
    /// [`stop`]: Task::stop
    #[must_use]
    pub fn on_stop<F>(mut self, callback: F) -> Self
    where
        F: FnOnce() + 'static,
    {
        self.callback = Some(Box::new(callback));
        self
    }

    /// Returns the underlying coroutine, for inspecting its id or the last
    /// yielded sub-task.
    #[inline]
    pub fn coroutine(&self) -> &Coroutine {
        &self.coro
    }

    /// Whether [`stop`] has been called on this task.
    ///
    /// [`stop`]: Task::stop
    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// The last yielded sub-task, if it still has work to do.
    fn pending_sub_task(&self) -> Option<TaskHandle> {
        self.coro.current().filter(|cur| !cur.borrow().is_done())
    }
}

impl Task for CoroTask {
    fn is_done(&self) -> bool {
        if self.pending_sub_task().is_some() {
            return false;
        }

        self.coro.is_terminal()
    }

    fn step(&mut self, dt: f32) {
        // Exactly one of the two advances happens per tick: either the
        // pending sub-task consumes the delta, or the body is resumed and
        // whatever it yields starts ticking next frame.
        if let Some(cur) = self.pending_sub_task() {
            cur.borrow_mut().step(dt);
            return;
        }

        self.coro.resume();
    }

    fn stop(&mut self) {
        if self.stopped {
            return;
        }
        self.stopped = true;

        if let Some(cur) = self.pending_sub_task() {
            cur.borrow_mut().stop();
        }

        trace!(coro = ?self.coro.id(), "coroutine task stopped");

        if let Some(callback) = self.callback.take() {
            callback();
        }
    }
}

impl fmt::Debug for CoroTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoroTask")
            .field("coro", &self.coro)
            .field("has_callback", &self.callback.is_some())
            .field("stopped", &self.stopped)
            .finish()
    }
}
