use std::cell::Cell;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use tracing::trace;

use crate::coro::Coroutine;
use crate::coro::waker::noop_waker;
use crate::task::{Task, TaskHandle, handle};
use crate::time::Frames;

/// Slot shared between an async body and the frame polling it: the body
/// publishes each yielded sub-task here, the frame takes it back out.
type YieldSlot = Rc<Cell<Option<TaskHandle>>>;

impl Coroutine {
    /// Creates a coroutine whose body is an `async` block.
    ///
    /// `async` blocks are Rust's native suspended computations, which makes
    /// them the most direct way to author a body: every
    /// [`Yielder::wait`]`.await` is a yield point, and falling off the end
    /// of the block is the terminal return. The closure itself runs eagerly
    /// to build the future, but the future is inert until the first
    /// [`resume`], so side effects belong inside the `async` block.
    ///
    /// Bodies should suspend only through the [`Yielder`]. Awaiting a
    /// foreign future is tolerated: whenever it is still pending at a yield
    /// boundary the coroutine pauses for one frame and polls it again on
    /// the next resume.
    ///
    /// ```
    /// use koru::coro::Coroutine;
    /// use koru::time::Delay;
    ///
    /// let mut coro = Coroutine::from_future(|y| async move {
    ///     y.wait(Delay::secs(0.5)).await;
    ///     y.wait(Delay::secs(0.25)).await;
    /// });
    ///
    /// assert!(coro.resume());
    /// assert!(coro.current().is_some());
    /// ```
    ///
    /// [`resume`]: Coroutine::resume
    pub fn from_future<F, Fut>(body: F) -> Self
    where
        F: FnOnce(Yielder) -> Fut,
        Fut: Future<Output = ()> + 'static,
    {
        let slot: YieldSlot = Rc::default();
        let yielder = Yielder {
            slot: Rc::clone(&slot),
        };
        let fut = body(yielder);

        Coroutine::new(FutureFrame {
            fut: Box::pin(fut),
            slot,
        })
    }
}

/// Handle for yielding sub-tasks out of an async coroutine body.
///
/// Cloneable, so a body can pass it into helper functions; all clones
/// publish into the same coroutine frame.
#[derive(Clone)]
pub struct Yielder {
    slot: YieldSlot,
}

impl Yielder {
    /// Hands `task` to the frame owner and suspends.
    ///
    /// The body continues when the owner next resumes it. Under a
    /// [`CoroTask`] that happens on the first tick after `task` reports
    /// done.
    ///
    /// [`CoroTask`]: crate::coro::CoroTask
    #[must_use]
    pub fn wait<T: Task + 'static>(&self, task: T) -> Wait {
        self.wait_handle(handle(task))
    }

    /// Like [`wait`], but yields an existing shared handle, leaving the
    /// caller a co-owner of the sub-task.
    ///
    /// [`wait`]: Yielder::wait
    #[must_use]
    pub fn wait_handle(&self, task: TaskHandle) -> Wait {
        Wait {
            slot: Rc::clone(&self.slot),
            task: Some(task),
        }
    }

    /// Gives up the rest of the current frame without waiting on anything;
    /// the body resumes on the next tick.
    #[must_use]
    pub fn next_frame(&self) -> Wait {
        self.wait(Frames::new(0))
    }
}

impl fmt::Debug for Yielder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Yielder").finish()
    }
}

/// Future returned by the [`Yielder`] methods; suspends the body exactly
/// once.
pub struct Wait {
    slot: YieldSlot,
    /// Published on the first poll; `None` afterwards, which doubles as the
    /// completion flag.
    task: Option<TaskHandle>,
}

impl Future for Wait {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, _ctx: &mut Context<'_>) -> Poll<()> {
        match self.task.take() {
            Some(task) => {
                // First poll: hand the sub-task to the frame and suspend.
                // No waker is registered because resumption is the frame
                // owner's decision, delivered as the next poll.
                self.slot.set(Some(task));
                Poll::Pending
            }
            None => Poll::Ready(()),
        }
    }
}

impl fmt::Debug for Wait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wait")
            .field("yielded", &self.task.is_none())
            .finish()
    }
}

/// Frame driving an async body as a lazy sequence of yields.
struct FutureFrame {
    /// Pinned, heap-allocated, type-erased body.
    fut: Pin<Box<dyn Future<Output = ()>>>,
    slot: YieldSlot,
}

impl Iterator for FutureFrame {
    type Item = TaskHandle;

    fn next(&mut self) -> Option<TaskHandle> {
        // A publish from a previous resume must not be mistaken for a fresh
        // yield; the slot refills below if the body yields again.
        self.slot.take();

        let waker = noop_waker();
        let mut ctx = Context::from_waker(&waker);

        match self.fut.as_mut().poll(&mut ctx) {
            Poll::Ready(()) => None,
            Poll::Pending => Some(self.slot.take().unwrap_or_else(|| {
                // The body suspended on a future that is not one of ours.
                // Pause for a frame so it gets polled again next tick.
                trace!("async coroutine body suspended on a foreign future");
                handle(Frames::new(0))
            })),
        }
    }
}
