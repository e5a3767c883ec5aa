//! Getting Started
//!
//! The smallest useful actor: pattern-matched behavior, reply, and a
//! fire-and-forget send from outside any actor's own context.

use rtactor::prelude::*;

struct Greeter;

impl Actor for Greeter {
    fn init(&mut self, _ctx: &mut ActorContext<Self>) -> Behavior<Self, ActorContext<Self>> {
        BehaviorBuilder::new()
            .on(
                Pattern::new(vec![Slot::typed::<String>()]).unwrap(),
                |_actor, ctx, payload, _mapping| {
                    let name = payload.get::<String>(0).cloned().unwrap_or_default();
                    println!("greeter: hello, {name}");
                    ctx.reply(Tuple::from_static((format!("hello, {name}"),)));
                },
            )
            .build()
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let system = ActorSystem::new(SystemConfig::default());
    let greeter = system.spawn(Greeter).unwrap();

    system
        .send(&greeter, Tuple::from_static(("world".to_string(),)))
        .unwrap();

    tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    println!("actors still live: {}", system.actor_count());
}
