use std::thread;
use std::time::Duration;

use koru::coro::{CoroTask, Coroutine};
use koru::task::Task;
use koru::time::Delay;

fn main() {
    let coro = Coroutine::from_future(|y| async move {
        for n in (1..=3).rev() {
            println!("{n}...");
            y.wait(Delay::secs(1.0)).await;
        }
        println!("liftoff");
    });

    let mut task = CoroTask::with_coroutine(coro);

    // Fixed-rate driver loop; any tick source works.
    let dt = 1.0 / 60.0;
    while !task.is_done() {
        task.step(dt);
        thread::sleep(Duration::from_millis(16));
    }
}
