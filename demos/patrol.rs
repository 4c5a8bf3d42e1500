use koru::coro::{CoroTask, Coroutine};
use koru::task::Task;
use koru::time::Delay;
use tracing_subscriber::EnvFilter;

/// Moves an x coordinate toward a target at a fixed speed.
struct Walk {
    x: f32,
    target: f32,
    speed: f32,
}

impl Task for Walk {
    fn is_done(&self) -> bool {
        self.x == self.target
    }

    fn step(&mut self, dt: f32) {
        let leg = self.target - self.x;
        let stride = self.speed * dt;

        if stride >= leg.abs() {
            self.x = self.target;
        } else {
            self.x += leg.signum() * stride;
        }
    }

    fn stop(&mut self) {
        println!("walk interrupted at x = {:.2}", self.x);
    }
}

fn main() {
    // Run with RUST_LOG=koru=trace to watch the yields and resumes.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let coro = Coroutine::from_future(|y| async move {
        let mut x = 0.0;
        for post in [10.0_f32, 0.0, 10.0] {
            println!("heading to post {post}");
            y.wait(Walk {
                x,
                target: post,
                speed: 5.0,
            })
            .await;
            x = post;
            y.wait(Delay::secs(0.5)).await;
        }
        println!("patrol complete");
    });

    let mut guard =
        CoroTask::with_coroutine(coro).on_stop(|| println!("guard recalled"));

    // Recall the guard partway through the second leg.
    for tick in 0.. {
        if guard.is_done() {
            break;
        }
        if tick == 60 {
            guard.stop();
            break;
        }
        guard.step(0.05);
    }
}
