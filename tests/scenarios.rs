//! The six literal end-to-end scenarios: concrete inputs run through a real
//! `ActorSystem`, checked against the outputs each one promises, rather than
//! the property-style invariants covered in `tests/properties.rs`.

use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use rtactor::linking;
use rtactor::pattern::{Pattern, Slot};
use rtactor::prelude::*;

async fn settle() {
    tokio::time::sleep(Duration::from_millis(50)).await;
}

// --- 1: Ping/pong ------------------------------------------------------

#[tokio::test]
async fn scenario_ping_pong_terminates_both_normally() {
    struct Pong;
    impl Actor for Pong {
        fn init(&mut self, _ctx: &mut ActorContext<Self>) -> Behavior<Self, ActorContext<Self>> {
            BehaviorBuilder::new()
                .on(
                    Pattern::new(vec![Slot::typed::<String>()]).unwrap(),
                    |_actor, ctx, _payload, _mapping| {
                        ctx.reply(Tuple::from_static(("pong".to_string(),)));
                        ctx.quit(ExitReason::NORMAL);
                    },
                )
                .build()
        }
    }

    struct Ping {
        pong: ActorHandle,
    }
    impl Actor for Ping {
        fn init(&mut self, ctx: &mut ActorContext<Self>) -> Behavior<Self, ActorContext<Self>> {
            let request = ctx.request(&self.pong, Tuple::from_static(("ping".to_string(),)));
            request.then(
                ctx,
                BehaviorBuilder::new()
                    .on(
                        Pattern::new(vec![Slot::typed::<String>()]).unwrap(),
                        |_actor, ctx, _payload, _mapping| {
                            ctx.quit(ExitReason::NORMAL);
                        },
                    )
                    .build(),
            );
            BehaviorBuilder::new().build()
        }
    }

    let system = ActorSystem::new(SystemConfig::default());
    let pong = system.spawn(Pong).unwrap();
    let _ping = system.spawn(Ping { pong }).unwrap();

    settle().await;
    assert_eq!(system.actor_count(), 0);
}

// --- 2: Sync timeout -----------------------------------------------------

#[tokio::test]
async fn scenario_sync_timeout_fires_without_a_late_response() {
    struct Silent;
    impl Actor for Silent {
        fn init(&mut self, _ctx: &mut ActorContext<Self>) -> Behavior<Self, ActorContext<Self>> {
            // No clause ever matches; the request is never answered within
            // the test's lifetime.
            BehaviorBuilder::new().build()
        }
    }

    struct Waiter {
        silent: ActorHandle,
        timed_out: Arc<AtomicBool>,
        responded: Arc<AtomicBool>,
    }
    impl Actor for Waiter {
        fn init(&mut self, ctx: &mut ActorContext<Self>) -> Behavior<Self, ActorContext<Self>> {
            let timed_out = Arc::clone(&self.timed_out);
            let responded = Arc::clone(&self.responded);
            let request = ctx.timed_request(&self.silent, Duration::from_millis(80), Tuple::from_static(("hello".to_string(),)));
            request.then(
                ctx,
                BehaviorBuilder::new()
                    .on(
                        Pattern::new(vec![Slot::typed::<SystemSignal>()]).unwrap(),
                        move |_actor, ctx, payload, _mapping| {
                            if matches!(payload.get::<SystemSignal>(0), Some(SystemSignal::SyncTimeout { .. })) {
                                timed_out.store(true, Ordering::SeqCst);
                            }
                            ctx.quit(ExitReason::NORMAL);
                        },
                    )
                    .on(
                        Pattern::new(vec![Slot::typed::<String>()]).unwrap(),
                        move |_actor, ctx, _payload, _mapping| {
                            responded.store(true, Ordering::SeqCst);
                            ctx.quit(ExitReason::NORMAL);
                        },
                    )
                    .build(),
            );
            BehaviorBuilder::new().build()
        }
    }

    let system = ActorSystem::new(SystemConfig::default());
    let silent = system.spawn(Silent).unwrap();
    let timed_out = Arc::new(AtomicBool::new(false));
    let responded = Arc::new(AtomicBool::new(false));
    let _waiter = system
        .spawn(Waiter {
            silent,
            timed_out: Arc::clone(&timed_out),
            responded: Arc::clone(&responded),
        })
        .unwrap();

    tokio::time::sleep(Duration::from_millis(150)).await;
    assert!(timed_out.load(Ordering::SeqCst));
    assert!(!responded.load(Ordering::SeqCst));
}

// --- 3: Link propagation of abnormal exit --------------------------------

struct Quitter {
    reason: ExitReason,
}
impl Actor for Quitter {
    fn init(&mut self, ctx: &mut ActorContext<Self>) -> Behavior<Self, ActorContext<Self>> {
        ctx.quit(self.reason);
        BehaviorBuilder::new().build()
    }
}

struct Noop;
impl Actor for Noop {
    fn init(&mut self, _ctx: &mut ActorContext<Self>) -> Behavior<Self, ActorContext<Self>> {
        BehaviorBuilder::new().build()
    }
}

struct DownWatcher {
    downs: Arc<AtomicI32>,
}
impl Actor for DownWatcher {
    fn init(&mut self, _ctx: &mut ActorContext<Self>) -> Behavior<Self, ActorContext<Self>> {
        let downs = Arc::clone(&self.downs);
        BehaviorBuilder::new()
            .on(
                Pattern::new(vec![Slot::typed::<SystemSignal>()]).unwrap(),
                move |_actor, _ctx, payload, _mapping| {
                    if matches!(payload.get::<SystemSignal>(0), Some(SystemSignal::Down { .. })) {
                        downs.fetch_add(1, Ordering::SeqCst);
                    }
                },
            )
            .build()
    }
}

#[tokio::test]
async fn scenario_link_propagates_abnormal_exit_to_non_trapping_peer() {
    let system = ActorSystem::new(SystemConfig::default());
    let downs = Arc::new(AtomicI32::new(0));
    let watcher = system
        .spawn(DownWatcher {
            downs: Arc::clone(&downs),
        })
        .unwrap();

    // `a` does not trap exits.
    let a = system.spawn(Noop).unwrap();
    linking::monitor(&watcher, &a);
    let _b = system.spawn_linked(Quitter { reason: ExitReason::user_defined(42) }, &a).unwrap();

    settle().await;
    // Both `a` and `b` are gone; only `watcher` remains.
    assert_eq!(system.actor_count(), 1);
    assert_eq!(downs.load(Ordering::SeqCst), 1);
}

// --- 4: Trap exits --------------------------------------------------------

#[tokio::test]
async fn scenario_trap_exit_delivers_exit_as_an_ordinary_envelope() {
    struct Trapper {
        exits: Arc<AtomicI32>,
    }
    impl Actor for Trapper {
        fn init(&mut self, ctx: &mut ActorContext<Self>) -> Behavior<Self, ActorContext<Self>> {
            ctx.trap_exit(true);
            let exits = Arc::clone(&self.exits);
            BehaviorBuilder::new()
                .on(
                    Pattern::new(vec![Slot::typed::<SystemSignal>()]).unwrap(),
                    move |_actor, _ctx, payload, _mapping| {
                        if matches!(payload.get::<SystemSignal>(0), Some(SystemSignal::Exit { .. })) {
                            exits.fetch_add(1, Ordering::SeqCst);
                        }
                    },
                )
                .build()
        }
    }

    let system = ActorSystem::new(SystemConfig::default());
    let exits = Arc::new(AtomicI32::new(0));
    let a = system.spawn(Trapper { exits: Arc::clone(&exits) }).unwrap();
    let _b = system.spawn_linked(Quitter { reason: ExitReason::user_defined(42) }, &a).unwrap();

    settle().await;
    assert_eq!(exits.load(Ordering::SeqCst), 1);
    // `a` received the EXIT as an ordinary message and kept running.
    assert_eq!(system.actor_count(), 1);
}

// --- 5: Pattern cache ------------------------------------------------------

#[tokio::test]
async fn scenario_pattern_cache_dispatches_each_shape_to_its_own_clause() {
    struct CacheActor {
        pair_hits: Arc<AtomicI32>,
        single_hits: Arc<AtomicI32>,
    }
    impl Actor for CacheActor {
        fn init(&mut self, _ctx: &mut ActorContext<Self>) -> Behavior<Self, ActorContext<Self>> {
            let pair_hits = Arc::clone(&self.pair_hits);
            let single_hits = Arc::clone(&self.single_hits);
            BehaviorBuilder::new()
                .on(
                    Pattern::new(vec![Slot::typed::<i32>(), Slot::typed::<String>()]).unwrap(),
                    move |_actor, _ctx, _payload, _mapping| {
                        pair_hits.fetch_add(1, Ordering::SeqCst);
                    },
                )
                .on(
                    Pattern::new(vec![Slot::typed::<String>()]).unwrap(),
                    move |_actor, _ctx, _payload, _mapping| {
                        single_hits.fetch_add(1, Ordering::SeqCst);
                    },
                )
                .build()
        }
    }

    let system = ActorSystem::new(SystemConfig::default());
    let pair_hits = Arc::new(AtomicI32::new(0));
    let single_hits = Arc::new(AtomicI32::new(0));
    let handle = system
        .spawn(CacheActor {
            pair_hits: Arc::clone(&pair_hits),
            single_hits: Arc::clone(&single_hits),
        })
        .unwrap();

    system.send(&handle, Tuple::from_static((7i32, "x".to_string()))).unwrap();
    system.send(&handle, Tuple::from_static(("y".to_string(),))).unwrap();
    settle().await;

    assert_eq!(pair_hits.load(Ordering::SeqCst), 1);
    assert_eq!(single_hits.load(Ordering::SeqCst), 1);
}

// --- 6: Become + cache drain -----------------------------------------------

#[tokio::test]
async fn scenario_become_drains_the_cache_before_new_envelopes() {
    struct Becoming {
        log: Arc<Mutex<Vec<&'static str>>>,
    }
    impl Becoming {
        fn b2(log: Arc<Mutex<Vec<&'static str>>>) -> Behavior<Self, ActorContext<Self>> {
            BehaviorBuilder::new()
                .on(
                    Pattern::new(vec![Slot::typed::<String>()]).unwrap(),
                    move |_actor, _ctx, _payload, _mapping| {
                        log.lock().unwrap().push("b2:str");
                    },
                )
                .build()
        }
    }
    impl Actor for Becoming {
        fn init(&mut self, _ctx: &mut ActorContext<Self>) -> Behavior<Self, ActorContext<Self>> {
            let log = Arc::clone(&self.log);
            BehaviorBuilder::new()
                .on(
                    Pattern::new(vec![Slot::typed::<i32>()]).unwrap(),
                    move |_actor, ctx, _payload, _mapping| {
                        log.lock().unwrap().push("b1:i32");
                        ctx.become_behavior(Becoming::b2(Arc::clone(&log)), BecomePolicy::Discard);
                    },
                )
                .build()
        }
    }

    let system = ActorSystem::new(SystemConfig::default());
    let log = Arc::new(Mutex::new(Vec::new()));
    let handle = system.spawn(Becoming { log: Arc::clone(&log) }).unwrap();

    // `"x"` does not match `B1`'s `i32`-only clause and is cached; `1i32`
    // dispatches immediately and triggers `become(B2)`.
    system.send(&handle, Tuple::from_static(("x".to_string(),))).unwrap();
    system.send(&handle, Tuple::from_static((1i32,))).unwrap();
    settle().await;

    // The cached `"x"` is replayed against `B2` as soon as it installs,
    // ahead of anything a fresh mailbox fetch would have delivered.
    let entries = log.lock().unwrap().clone();
    assert_eq!(entries, vec!["b1:i32", "b2:str"]);
}
