//! Link/Monitor
//!
//! `worker` quits abnormally; `buddy` is linked to it and does not trap
//! exits, so it terminates with the same reason; `watcher` monitors
//! `buddy` and observes its `DOWN`.

use rtactor::linking;
use rtactor::prelude::*;

struct Worker;

impl Actor for Worker {
    fn init(&mut self, ctx: &mut ActorContext<Self>) -> Behavior<Self, ActorContext<Self>> {
        ctx.quit(ExitReason::user_defined(42));
        BehaviorBuilder::new().build()
    }
}

struct Buddy;

impl Actor for Buddy {
    fn init(&mut self, _ctx: &mut ActorContext<Self>) -> Behavior<Self, ActorContext<Self>> {
        BehaviorBuilder::new().build()
    }
}

struct Watcher;

impl Actor for Watcher {
    fn init(&mut self, _ctx: &mut ActorContext<Self>) -> Behavior<Self, ActorContext<Self>> {
        BehaviorBuilder::new()
            .on(
                Pattern::new(vec![Slot::typed::<SystemSignal>()]).unwrap(),
                |_actor, _ctx, payload, _mapping| {
                    if let Some(SystemSignal::Down { from, reason }) =
                        payload.get::<SystemSignal>(0)
                    {
                        println!("watcher: {from} went DOWN with reason {reason}");
                    }
                },
            )
            .build()
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let system = ActorSystem::new(SystemConfig::default());

    let buddy = system.spawn(Buddy).unwrap();
    let watcher = system.spawn(Watcher).unwrap();

    linking::monitor(&watcher, &buddy);

    let _worker = system.spawn_linked(Worker, &buddy).unwrap();

    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    println!("actors still live: {}", system.actor_count());
}
