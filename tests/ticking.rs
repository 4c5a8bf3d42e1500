//! End-to-end loops driving coroutine tasks the way a frame scheduler
//! would, plus property checks over randomized scripts.

use std::cell::Cell;
use std::rc::Rc;

use koru::coro::{CoroTask, Coroutine};
use koru::task::{Task, handle};
use koru::time::{Delay, Frames};
use proptest::prelude::*;

/// Quarter-second ticks divide the test delays exactly.
const DT: f32 = 0.25;

/// Sub-task that is never done but remembers being stopped.
struct Signal {
    stopped: Rc<Cell<bool>>,
}

impl Task for Signal {
    fn is_done(&self) -> bool {
        false
    }

    fn step(&mut self, _dt: f32) {}

    fn stop(&mut self) {
        self.stopped.set(true);
    }
}

fn drive(task: &mut impl Task, dt: f32) -> u32 {
    let mut ticks = 0;
    while !task.is_done() {
        task.step(dt);
        ticks += 1;
        assert!(ticks < 10_000, "task never finished");
    }

    ticks
}

#[test]
fn test_timed_sequence_runs_to_completion() {
    let mut task =
        CoroTask::with_coroutine(Coroutine::from_future(|y| async move {
            y.wait(Delay::secs(1.0)).await;
            y.wait(Frames::new(3)).await;
        }));

    // One resume per yield plus the terminal one, four quarter-second
    // ticks for the delay, three for the frame wait.
    assert_eq!(drive(&mut task, DT), 10);
}

#[test]
fn test_nested_coroutine_task() {
    let inner = CoroTask::new(vec![handle(Frames::new(2))]);
    let mut outer =
        CoroTask::with_coroutine(Coroutine::from_future(|y| async move {
            y.wait(inner).await;
        }));

    // Outer: two resumes around four forwarded ticks; inner spends those
    // four on its own resumes and the two frame ticks.
    assert_eq!(drive(&mut outer, DT), 6);
}

#[test]
fn test_stop_propagates_through_nesting() {
    let stopped = Rc::new(Cell::new(false));
    let flag = Rc::clone(&stopped);

    let inner = CoroTask::new(vec![handle(Signal { stopped: flag })]);
    let mut outer =
        CoroTask::with_coroutine(Coroutine::from_future(|y| async move {
            y.wait(inner).await;
        }));

    // Two ticks put the leaf two levels down in the active position.
    outer.step(DT);
    outer.step(DT);
    outer.stop();

    assert!(stopped.get());
}

#[test]
fn test_finished_sub_task_handle_released() {
    let tracked = handle(Frames::new(1));
    let weak = Rc::downgrade(&tracked);

    let mut task = CoroTask::new(vec![tracked]);

    task.step(DT);
    assert!(weak.upgrade().is_some());

    drive(&mut task, DT);
    assert!(task.is_done());
    assert_eq!(weak.strong_count(), 0);
}

#[test]
fn test_take_hands_off_mid_flight() {
    let mut original =
        Coroutine::new(vec![handle(Frames::new(1)), handle(Frames::new(1))]);
    original.resume();

    let mut task = CoroTask::with_coroutine(original.take());

    assert!(original.is_terminal());
    assert!(!original.resume());

    // The moved coroutine still owes one forward, a resume, another
    // forward, and the terminal resume.
    assert_eq!(drive(&mut task, DT), 4);
}

fn script_strategy() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec(0u32..4, 0..6)
}

proptest! {
    #[test]
    fn test_script_tick_count_is_exact(script in script_strategy()) {
        let forwarded: u32 = script.iter().sum();
        let mut task = CoroTask::new(
            script.clone().into_iter().map(|n| handle(Frames::new(n))),
        );

        let mut ticks = 0u32;
        while !task.is_done() {
            task.step(DT);
            ticks += 1;
            prop_assert!(ticks <= 100, "runaway tick loop");
        }

        // One resume per yield plus the terminal one, and each yielded
        // Frames(n) soaks up exactly n forwarded ticks.
        prop_assert_eq!(ticks, script.len() as u32 + 1 + forwarded);

        task.step(DT);
        prop_assert!(task.is_done());
    }

    #[test]
    fn test_resume_count_is_yields_plus_one(script in script_strategy()) {
        let resumes = Rc::new(Cell::new(0u32));
        let counter = Rc::clone(&resumes);
        let mut queue = script.clone().into_iter();

        let mut task = CoroTask::new(std::iter::from_fn(move || {
            counter.set(counter.get() + 1);
            queue.next().map(|n| handle(Frames::new(n)))
        }));

        drive(&mut task, DT);
        prop_assert_eq!(resumes.get(), script.len() as u32 + 1);
    }
}
