//! Frame-driven coroutine tasks for cooperative game logic.
//!
//! `koru` lets a piece of game logic pause mid-execution, hand control to a
//! nested sub-task that spans many frames, and resume automatically once
//! that sub-task finishes, all inside a single-threaded loop that steps
//! tasks once per frame. See the [`coro`] module for the execution model.

#![warn(
    missing_debug_implementations,
    missing_docs,
    rust_2018_idioms,
    unreachable_pub
)]
#![deny(unused_must_use)]

pub mod coro;
pub mod task;
pub mod time;

pub use task::{Task, TaskHandle};
