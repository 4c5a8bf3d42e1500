use std::cell::Cell;
use std::fmt;
use std::iter;
use std::panic::{self, AssertUnwindSafe};

use tracing::{trace, warn};

use crate::task::TaskHandle;

thread_local! {
    /// Guarantees that each `Coroutine` is assigned a unique ID.
    static NEXT_ID: Cell<u64> = const { Cell::new(0) };
}

/// Unique identifier for a [`Coroutine`].
///
/// Identifies the underlying computation, so [`Coroutine::take`] carries it
/// over to the new owner. Shows up in [`Debug`] output and log events.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct CoroId(u64);

impl CoroId {
    #[inline]
    fn next() -> Self {
        CoroId(NEXT_ID.with(|c| {
            let id = c.get();
            c.set(id + 1);
            id
        }))
    }
}

/// The suspended body of a [`Coroutine`], type-erased and heap-allocated.
///
/// A body is any lazy iterator over yielded sub-task handles: `next` runs
/// the computation to its next suspension point, `Some` hands out the
/// yielded sub-task, and `None` is the terminal return.
type Frame = Box<dyn Iterator<Item = TaskHandle>>;

/// A computation that can pause mid-execution by yielding sub-task handles,
/// owned and resumed by exactly one place at a time.
///
/// The body never runs on its own. Each call to [`resume`] advances it from
/// its current suspension point to the next yield or to completion; between
/// calls the most recently yielded sub-task is available through
/// [`current`], retained so it stays alive however its other owners behave.
///
/// Construction never executes body code: the body is stored suspended
/// before its first statement, and only [`resume`] runs it.
///
/// [`resume`]: Coroutine::resume
/// [`current`]: Coroutine::current
pub struct Coroutine {
    id: CoroId,
    /// The suspended computation. `None` once the body has completed or the
    /// frame has been moved out via [`Coroutine::take`].
    frame: Option<Frame>,
    /// The most recently yielded sub-task, retained between a yield and the
    /// next resume.
    current: Option<TaskHandle>,
}

impl Coroutine {
    /// Creates a coroutine from a lazy sequence of yields.
    ///
    /// Any iterator works as a body: a `Vec<TaskHandle>` is a fixed script,
    /// [`std::iter::from_fn`] wraps a closure (see [`Coroutine::from_fn`]),
    /// and a hand-written `Iterator` impl is a full state machine. Iterators
    /// are lazy, so no body code runs until the first [`resume`].
    ///
    /// [`resume`]: Coroutine::resume
    pub fn new<B>(body: B) -> Self
    where
        B: IntoIterator<Item = TaskHandle>,
        B::IntoIter: 'static,
    {
        Coroutine {
            id: CoroId::next(),
            frame: Some(Box::new(body.into_iter())),
            current: None,
        }
    }

    /// Creates a coroutine whose body is a closure returning the next yield,
    /// or `None` to finish.
    pub fn from_fn<F>(body: F) -> Self
    where
        F: FnMut() -> Option<TaskHandle> + 'static,
    {
        Coroutine::new(iter::from_fn(body))
    }

    /// Creates a coroutine with no frame at all.
    ///
    /// An empty coroutine is permanently terminal: [`resume`] reports no
    /// progress and [`current`] is `None`. It is what [`Coroutine::take`]
    /// leaves behind.
    ///
    /// [`resume`]: Coroutine::resume
    /// [`current`]: Coroutine::current
    pub fn empty() -> Self {
        Coroutine {
            id: CoroId::next(),
            frame: None,
            current: None,
        }
    }

    /// Returns the ID of this coroutine.
    #[inline]
    pub fn id(&self) -> CoroId {
        self.id
    }

    /// Returns the sub-task most recently yielded by the body, or `None` if
    /// the body has not yielded yet or has already completed past its last
    /// yield.
    ///
    /// The handle is retained by the coroutine until the next [`resume`], so
    /// the returned clone shares ownership with the frame.
    ///
    /// [`resume`]: Coroutine::resume
    pub fn current(&self) -> Option<TaskHandle> {
        self.current.clone()
    }

    /// Returns `true` once the body has run to completion, or if this
    /// coroutine never had a frame to begin with.
    ///
    /// A terminal coroutine cannot be resumed meaningfully; while suspended
    /// at a yield point it is not terminal.
    pub fn is_terminal(&self) -> bool {
        self.frame.is_none()
    }

    /// Runs the body from its current suspension point to the next yield or
    /// to completion.
    ///
    /// On a yield, the yielded sub-task replaces the previous [`current`]
    /// handle (releasing it) and `true` is returned. On completion the slot
    /// is cleared, the frame is released, and `false` is returned. Resuming
    /// a terminal or empty coroutine is a no-op returning `false`. In short:
    /// the return value reports whether further resumption is meaningful.
    ///
    /// A panic inside the body is folded into normal termination: the frame
    /// is discarded, so its possibly inconsistent state can never be
    /// observed again, and the panic is reported through [`tracing`] only.
    ///
    /// [`current`]: Coroutine::current
    pub fn resume(&mut self) -> bool {
        let Some(frame) = self.frame.as_mut() else {
            return false;
        };

        let next = panic::catch_unwind(AssertUnwindSafe(|| frame.next()));

        match next {
            Ok(Some(task)) => {
                trace!(id = self.id.0, "coroutine yielded a sub-task");
                self.current = Some(task);
                true
            }
            Ok(None) => {
                trace!(id = self.id.0, "coroutine completed");
                self.current = None;
                self.frame = None;
                false
            }
            Err(_) => {
                warn!(id = self.id.0, "coroutine body panicked; treated as completed");
                self.current = None;
                self.frame = None;
                false
            }
        }
    }

    /// Moves the frame and the retained sub-task handle into a new
    /// coroutine, leaving this one empty.
    ///
    /// The source keeps its ID but permanently behaves like
    /// [`Coroutine::empty`] afterwards; the returned coroutine continues
    /// from the same suspension point.
    pub fn take(&mut self) -> Coroutine {
        Coroutine {
            id: self.id,
            frame: self.frame.take(),
            current: self.current.take(),
        }
    }
}

impl Default for Coroutine {
    /// Creates an empty coroutine.
    fn default() -> Self {
        Coroutine::empty()
    }
}

impl fmt::Debug for Coroutine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Coroutine")
            .field("id", &self.id)
            .field("suspended", &self.frame.is_some())
            .field("has_yielded_task", &self.current.is_some())
            .finish()
    }
}
