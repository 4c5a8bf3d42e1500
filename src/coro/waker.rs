use std::ptr;
use std::task::{RawWaker, RawWakerVTable, Waker};

/// Returns a [`Waker`] that does nothing when woken.
///
/// Async coroutine bodies are resumed by their frame owner's next tick,
/// never by a wake, so polling them only needs a placeholder context.
pub(crate) fn noop_waker() -> Waker {
    // SAFETY: The vtable consists solely of no-op functions and the data
    // pointer is never accessed, making the waker trivially valid.
    unsafe { Waker::from_raw(noop_raw_waker()) }
}

const fn noop_raw_waker() -> RawWaker {
    const VTABLE: RawWakerVTable = RawWakerVTable::new(
        |_: *const ()| -> RawWaker { noop_raw_waker() },
        |_: *const ()| {},
        |_: *const ()| {},
        |_: *const ()| {},
    );

    RawWaker::new(ptr::null(), &VTABLE)
}
