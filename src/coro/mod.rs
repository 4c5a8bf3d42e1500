//! Cooperative suspension for frame-stepped tasks.
//!
//! Game logic written against a tick source lives in an awkward shape: the
//! loop calls `step(dt)` once per frame, so anything that spans frames has
//! to be chopped into a hand-rolled state machine whose control flow ends
//! up smeared across fields and `match` arms. The sequential story ("walk
//! there, wait two seconds, walk back") is nowhere in the code.
//!
//! A coroutine puts the sequential story back. The body is an ordinary
//! computation that *yields* whenever it wants to hand a stretch of frames
//! to a sub-task: yielding publishes a shared handle to that sub-task and
//! suspends the body. The frame owner then forwards ticks to the sub-task
//! until it reports done, resumes the body, and the story continues from
//! the line after the yield.
//!
//! Two ownership disciplines keep this sound on one thread without locks:
//!
//! - The suspended frame has exactly one owner at a time. Resuming requires
//!   `&mut` access, moves transfer the frame whole, and [`Coroutine::take`]
//!   leaves an inert shell behind, so a frame can never be resumed from two
//!   places.
//! - The yielded sub-task is shared, not owned: it crosses the boundary as
//!   a reference-counted [`TaskHandle`], retained by the frame between a
//!   yield and the next resume so that no other owner can free it while the
//!   suspended body still intends to consult it.
//!
//! [`CoroTask`] closes the loop by implementing the stepped-task protocol
//! on top of a coroutine: each tick it either forwards `dt` to the pending
//! sub-task or resumes the frame, exactly one of the two, never both.
//!
//! ```
//! use koru::coro::{CoroTask, Coroutine};
//! use koru::task::Task;
//! use koru::time::Frames;
//!
//! let coro = Coroutine::from_future(|y| async move {
//!     y.wait(Frames::new(2)).await;
//!     y.wait(Frames::new(1)).await;
//! });
//!
//! let mut task = CoroTask::with_coroutine(coro);
//!
//! let mut ticks = 0;
//! while !task.is_done() {
//!     task.step(1.0 / 60.0);
//!     ticks += 1;
//! }
//! // Two yields, three forwarded sub-task steps, one final resume.
//! assert_eq!(ticks, 6);
//! ```
//!
//! [`TaskHandle`]: crate::task::TaskHandle

mod adapter;
pub use adapter::CoroTask;

mod coroutine;
pub use coroutine::{CoroId, Coroutine};

mod future;
pub use future::{Wait, Yielder};

mod waker;
