use std::time::Duration;

use koru::coro::Coroutine;
use koru::task::handle;
use koru::time::{Delay, Frames};

fn main() {
    // A fixed script is just a list of sub-tasks; the coroutine hands them
    // out one per resume.
    let mut coro = Coroutine::new(vec![
        handle(Frames::new(3)),
        handle(Delay::new(Duration::from_millis(100))),
        handle(Frames::new(1)),
    ]);

    println!("running {:?}", coro.id());

    let mut step_no = 0;
    while coro.resume() {
        if let Some(current) = coro.current() {
            step_no += 1;

            let mut ticks = 0;
            while !current.borrow().is_done() {
                current.borrow_mut().step(1.0 / 60.0);
                ticks += 1;
            }
            println!("step {step_no} finished after {ticks} ticks");
        }
    }

    println!("script done: {}", coro.is_terminal());
}
