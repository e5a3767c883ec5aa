//! Ping/Pong
//!
//! Two actors exchanging requests through `ActorContext::request` and the
//! `.then()` response-waiting behavior, each `become`-ing back to its idle
//! behavior once the reply lands.

use rtactor::prelude::*;

struct Ping {
    pong: Option<ActorHandle>,
    remaining: u32,
}

impl Actor for Ping {
    fn init(&mut self, _ctx: &mut ActorContext<Self>) -> Behavior<Self, ActorContext<Self>> {
        self.idle()
    }
}

impl Ping {
    fn idle(&self) -> Behavior<Self, ActorContext<Self>> {
        BehaviorBuilder::new()
            .on(
                Pattern::new(vec![Slot::typed::<ActorHandle>()]).unwrap(),
                |actor, ctx, payload, _mapping| {
                    let pong = payload.get::<ActorHandle>(0).cloned().unwrap();
                    actor.pong = Some(pong.clone());
                    actor.send_ping(ctx, &pong);
                },
            )
            .build()
    }

    fn send_ping(&mut self, ctx: &mut ActorContext<Self>, pong: &ActorHandle) {
        println!("ping: sending ({} left)", self.remaining);
        let request = ctx.request(pong, Tuple::from_static(("ping".to_string(),)));
        request.then(
            ctx,
            BehaviorBuilder::new()
                .on(
                    Pattern::new(vec![Slot::typed::<String>()]).unwrap(),
                    |actor, ctx, _payload, _mapping| {
                        actor.remaining = actor.remaining.saturating_sub(1);
                        if actor.remaining == 0 {
                            ctx.quit(ExitReason::NORMAL);
                        } else {
                            let pong = actor.pong.clone().unwrap();
                            actor.send_ping(ctx, &pong);
                        }
                    },
                )
                .build(),
        );
    }
}

struct Pong;

impl Actor for Pong {
    fn init(&mut self, _ctx: &mut ActorContext<Self>) -> Behavior<Self, ActorContext<Self>> {
        BehaviorBuilder::new()
            .on(
                Pattern::new(vec![Slot::typed::<String>()]).unwrap(),
                |_actor, ctx, _payload, _mapping| {
                    println!("pong: replying");
                    ctx.reply(Tuple::from_static(("pong".to_string(),)));
                },
            )
            .build()
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let system = ActorSystem::new(SystemConfig::default());
    let pong = system.spawn(Pong).unwrap();
    let ping = system
        .spawn(Ping {
            pong: None,
            remaining: 3,
        })
        .unwrap();

    system.send(&ping, Tuple::from_static((pong,))).unwrap();

    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    println!("actors still live: {}", system.actor_count());
}
