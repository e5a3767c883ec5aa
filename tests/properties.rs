//! Integration tests for the quantified invariants, round-trip/idempotence
//! laws, and boundary behaviors.
//!
//! P1/P2 and the type-token law are pure, synchronous checks against the
//! mailbox and pattern modules directly; everything that depends on the
//! link/monitor graph or the request engine runs a real `ActorSystem` to
//! quiescence and observes the result through shared atomics.

use std::sync::atomic::{AtomicBool, AtomicI32, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use rtactor::linking;
use rtactor::mailbox::{CooperativeMailbox, MessageCache};
use rtactor::message::Envelope;
use rtactor::pattern::{try_match, MatchCache, Pattern, Slot};
use rtactor::prelude::*;

async fn settle() {
    tokio::time::sleep(Duration::from_millis(50)).await;
}

struct Noop;
impl Actor for Noop {
    fn init(&mut self, _ctx: &mut ActorContext<Self>) -> Behavior<Self, ActorContext<Self>> {
        BehaviorBuilder::new().build()
    }
}

// --- P1/P2: mailbox ordering -----------------------------------------------

#[test]
fn p1_fifo_within_a_priority_band() {
    let mailbox = CooperativeMailbox::new();
    mailbox
        .push_back(Envelope::new(Tuple::from_static((1i32,))))
        .unwrap();
    mailbox
        .push_back(Envelope::new(Tuple::from_static((2i32,))))
        .unwrap();

    let first = mailbox.try_pop().unwrap();
    let second = mailbox.try_pop().unwrap();
    assert_eq!(first.payload.get::<i32>(0), Some(&1));
    assert_eq!(second.payload.get::<i32>(0), Some(&2));
}

#[test]
fn p2_high_priority_drains_before_normal() {
    let mailbox = CooperativeMailbox::new();
    mailbox
        .push_back(Envelope::new(Tuple::from_static(("normal".to_string(),))))
        .unwrap();
    mailbox
        .push_back(
            Envelope::new(Tuple::from_static(("high".to_string(),)))
                .with_priority(MessagePriority::High),
        )
        .unwrap();

    let first = mailbox.try_pop().unwrap();
    assert_eq!(first.payload.get::<String>(0), Some(&"high".to_string()));
    let second = mailbox.try_pop().unwrap();
    assert_eq!(second.payload.get::<String>(0), Some(&"normal".to_string()));
}

// --- L1: type-token round-trip ----------------------------------------------

#[test]
fn l1_same_static_shape_yields_the_same_token() {
    let a = Tuple::from_static((1i32, "x".to_string()));
    let b = Tuple::from_static((2i32, "y".to_string()));
    assert_eq!(a.type_token(), b.type_token());

    let reordered = Tuple::from_static(("z".to_string(), 1i32));
    assert_ne!(a.type_token(), reordered.type_token());
}

// --- Boundary: trailing variadic with k=0 accepts anything, including empty

#[test]
fn boundary_trailing_variadic_k_zero_accepts_empty_payload() {
    let pattern = Pattern::new(vec![Slot::any_many()]).unwrap();
    assert!(try_match(&pattern, &Tuple::unit()).is_some());
    assert!(try_match(&pattern, &Tuple::from_static((1i32, "x".to_string()))).is_some());
}

// --- P6 / boundary: empty handler list + zero-duration timeout -------------

#[tokio::test]
async fn boundary_zero_duration_timeout_fires_on_first_dispatch() {
    let fired = Arc::new(AtomicBool::new(false));

    struct Silent {
        fired: Arc<AtomicBool>,
    }
    impl Actor for Silent {
        fn init(&mut self, _ctx: &mut ActorContext<Self>) -> Behavior<Self, ActorContext<Self>> {
            let fired = Arc::clone(&self.fired);
            BehaviorBuilder::new()
                .with_timeout(Duration::ZERO, move |_actor, ctx| {
                    fired.store(true, Ordering::SeqCst);
                    ctx.quit(ExitReason::NORMAL);
                })
                .build()
        }
    }

    let system = ActorSystem::new(SystemConfig::default());
    system
        .spawn(Silent {
            fired: Arc::clone(&fired),
        })
        .unwrap();

    settle().await;
    assert!(fired.load(Ordering::SeqCst));
}

// --- P3: request pairing ----------------------------------------------------

#[tokio::test]
async fn p3_pending_set_clears_once_the_response_is_dispatched() {
    let pending_during = Arc::new(AtomicBool::new(false));
    let pending_after = Arc::new(AtomicBool::new(true));

    struct Responder;
    impl Actor for Responder {
        fn init(&mut self, _ctx: &mut ActorContext<Self>) -> Behavior<Self, ActorContext<Self>> {
            BehaviorBuilder::new()
                .on(
                    Pattern::new(vec![Slot::typed::<String>()]).unwrap(),
                    |_actor, ctx, _payload, _mapping| {
                        ctx.reply(Tuple::from_static(("pong".to_string(),)));
                    },
                )
                .build()
        }
    }

    struct Requester {
        target: ActorHandle,
        pending_during: Arc<AtomicBool>,
        pending_after: Arc<AtomicBool>,
    }
    impl Actor for Requester {
        fn init(&mut self, ctx: &mut ActorContext<Self>) -> Behavior<Self, ActorContext<Self>> {
            let target = self.target.clone();
            let pending_during = Arc::clone(&self.pending_during);
            let pending_after = Arc::clone(&self.pending_after);
            let request = ctx.request(&target, Tuple::from_static(("ping".to_string(),)));
            let id = request.id();
            pending_during.store(ctx.is_pending(id), Ordering::SeqCst);
            request.then(
                ctx,
                BehaviorBuilder::new()
                    .on(
                        Pattern::new(vec![Slot::typed::<String>()]).unwrap(),
                        move |_actor, ctx, _payload, _mapping| {
                            pending_after.store(ctx.is_pending(id), Ordering::SeqCst);
                        },
                    )
                    .build(),
            );
            BehaviorBuilder::new().build()
        }
    }

    let system = ActorSystem::new(SystemConfig::default());
    let responder = system.spawn(Responder).unwrap();
    system
        .spawn(Requester {
            target: responder,
            pending_during: Arc::clone(&pending_during),
            pending_after: Arc::clone(&pending_after),
        })
        .unwrap();

    settle().await;
    assert!(pending_during.load(Ordering::SeqCst));
    assert!(!pending_after.load(Ordering::SeqCst));
}

// --- P4 / L3: link symmetry and unlink restoring independence -------------

struct Quitter {
    reason: ExitReason,
}
impl Actor for Quitter {
    fn init(&mut self, ctx: &mut ActorContext<Self>) -> Behavior<Self, ActorContext<Self>> {
        ctx.quit(self.reason);
        BehaviorBuilder::new().build()
    }
}

#[tokio::test]
async fn p4_linked_peer_terminates_on_abnormal_exit() {
    let system = ActorSystem::new(SystemConfig::default());
    // `a` is idle (empty behavior, nothing ever sent to it) when `c` quits
    // abnormally in its own `init`; the fan-out must still reach `a` even
    // though `a`'s dispatch loop is parked on its empty mailbox the whole
    // time, never woken by an ordinary envelope.
    let a = system.spawn(Noop).unwrap();
    let c = system
        .spawn_linked(
            Quitter {
                reason: ExitReason::user_defined(42),
            },
            &a,
        )
        .unwrap();
    let _ = c;

    settle().await;
    // `a` does not trap exits, so an abnormal peer exit terminates it too;
    // both `a` and `c` are gone.
    assert_eq!(system.actor_count(), 0);
}

struct GatedQuitter {
    reason: ExitReason,
}
impl Actor for GatedQuitter {
    fn init(&mut self, _ctx: &mut ActorContext<Self>) -> Behavior<Self, ActorContext<Self>> {
        let reason = self.reason;
        BehaviorBuilder::new()
            .on(Pattern::new(vec![Slot::any_many()]).unwrap(), move |_actor, ctx, _payload, _mapping| {
                ctx.quit(reason);
            })
            .build()
    }
}

#[tokio::test]
async fn l3_unlink_restores_independence() {
    let system = ActorSystem::new(SystemConfig::default());
    let a = system.spawn(Noop).unwrap();
    let b = system
        .spawn(GatedQuitter {
            reason: ExitReason::user_defined(42),
        })
        .unwrap();
    linking::link(&a, &b);
    linking::unlink(&a, &b);

    // `b` now quits abnormally entirely on its own; since the link was
    // severed first, `a` must be unaffected.
    system.send(&b, Tuple::unit()).unwrap();

    settle().await;
    // `a` is still alive; only `b` terminated.
    assert_eq!(system.actor_count(), 1);
}

// --- P5: monitor-once idempotence under redundant monitor() calls --------

#[tokio::test]
async fn p5_redundant_monitor_calls_still_deliver_exactly_one_down() {
    let downs = Arc::new(AtomicUsize::new(0));

    struct Watcher {
        downs: Arc<AtomicUsize>,
    }
    impl Actor for Watcher {
        fn init(&mut self, _ctx: &mut ActorContext<Self>) -> Behavior<Self, ActorContext<Self>> {
            let downs = Arc::clone(&self.downs);
            BehaviorBuilder::new()
                .on(
                    Pattern::new(vec![Slot::typed::<SystemSignal>()]).unwrap(),
                    move |_actor, _ctx, payload, _mapping| {
                        if let Some(SystemSignal::Down { .. }) = payload.get::<SystemSignal>(0) {
                            downs.fetch_add(1, Ordering::SeqCst);
                        }
                    },
                )
                .build()
        }
    }

    struct Quitter;
    impl Actor for Quitter {
        fn init(&mut self, ctx: &mut ActorContext<Self>) -> Behavior<Self, ActorContext<Self>> {
            ctx.quit(ExitReason::NORMAL);
            BehaviorBuilder::new().build()
        }
    }

    let system = ActorSystem::new(SystemConfig::default());
    let watcher = system
        .spawn(Watcher {
            downs: Arc::clone(&downs),
        })
        .unwrap();
    let target = system.spawn(Quitter).unwrap();

    linking::monitor(&watcher, &target);
    linking::monitor(&watcher, &target); // redundant; the monitor set is a Set

    settle().await;
    assert_eq!(downs.load(Ordering::SeqCst), 1);
}

// --- P8: no handler invocation after quit is observed -----------------------

#[tokio::test]
async fn p8_no_dispatch_after_quit_is_observed() {
    let hits = Arc::new(AtomicI32::new(0));

    struct OneShot {
        hits: Arc<AtomicI32>,
    }
    impl Actor for OneShot {
        fn init(&mut self, _ctx: &mut ActorContext<Self>) -> Behavior<Self, ActorContext<Self>> {
            let hits = Arc::clone(&self.hits);
            BehaviorBuilder::new()
                .on(
                    Pattern::new(vec![Slot::typed::<i32>()]).unwrap(),
                    move |_actor, ctx, _payload, _mapping| {
                        hits.fetch_add(1, Ordering::SeqCst);
                        ctx.quit(ExitReason::NORMAL);
                    },
                )
                .build()
        }
    }

    let system = ActorSystem::new(SystemConfig::default());
    let handle = system
        .spawn(OneShot {
            hits: Arc::clone(&hits),
        })
        .unwrap();

    system.send(&handle, Tuple::from_static((1i32,))).unwrap();
    settle().await;
    // The mailbox is already closed by the time these arrive; at worst they
    // are dropped silently, never dispatched.
    let _ = system.send(&handle, Tuple::from_static((2i32,)));
    let _ = system.send(&handle, Tuple::from_static((3i32,)));
    settle().await;

    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

// --- L2: become; unbecome is a no-op on the behavior stack ------------------

#[tokio::test]
async fn l2_become_then_unbecome_restores_prior_behavior() {
    let hits = Arc::new(AtomicI32::new(0));

    struct Toggling {
        hits: Arc<AtomicI32>,
    }
    impl Actor for Toggling {
        fn init(&mut self, _ctx: &mut ActorContext<Self>) -> Behavior<Self, ActorContext<Self>> {
            let hits = Arc::clone(&self.hits);
            BehaviorBuilder::new()
                .on(
                    Pattern::new(vec![Slot::typed::<i32>()]).unwrap(),
                    move |_actor, _ctx, _payload, _mapping| {
                        hits.fetch_add(1, Ordering::SeqCst);
                    },
                )
                .on(
                    Pattern::new(vec![Slot::typed::<String>()]).unwrap(),
                    |_actor, ctx, _payload, _mapping| {
                        ctx.become_behavior(BehaviorBuilder::new().build(), BecomePolicy::Keep);
                    },
                )
                .on(
                    Pattern::new(vec![Slot::typed::<bool>()]).unwrap(),
                    |_actor, ctx, _payload, _mapping| {
                        ctx.unbecome();
                    },
                )
                .build()
        }
    }

    let system = ActorSystem::new(SystemConfig::default());
    let handle = system
        .spawn(Toggling {
            hits: Arc::clone(&hits),
        })
        .unwrap();

    system.send(&handle, Tuple::from_static((1i32,))).unwrap();
    settle().await;
    assert_eq!(hits.load(Ordering::SeqCst), 1);

    system
        .send(&handle, Tuple::from_static(("become-empty".to_string(),)))
        .unwrap();
    settle().await;
    system.send(&handle, Tuple::from_static((2i32,))).unwrap();
    settle().await;
    // The pushed, empty behavior does not match i32; it is cached.
    assert_eq!(hits.load(Ordering::SeqCst), 1);

    system.send(&handle, Tuple::from_static((true,))).unwrap();
    settle().await;
    // `unbecome` pops back to the original behavior, which then drains the
    // cached `2i32` envelope before anything new.
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn l2b_become_discard_replaces_without_restore() {
    let hits = Arc::new(AtomicI32::new(0));

    struct Switching {
        hits: Arc<AtomicI32>,
    }
    impl Actor for Switching {
        fn init(&mut self, _ctx: &mut ActorContext<Self>) -> Behavior<Self, ActorContext<Self>> {
            let hits = Arc::clone(&self.hits);
            BehaviorBuilder::new()
                .on(
                    Pattern::new(vec![Slot::typed::<i32>()]).unwrap(),
                    move |_actor, _ctx, _payload, _mapping| {
                        hits.fetch_add(1, Ordering::SeqCst);
                    },
                )
                .on(
                    Pattern::new(vec![Slot::typed::<String>()]).unwrap(),
                    |_actor, ctx, _payload, _mapping| {
                        ctx.become_behavior(BehaviorBuilder::new().build(), BecomePolicy::Discard);
                    },
                )
                .on(
                    Pattern::new(vec![Slot::typed::<bool>()]).unwrap(),
                    |_actor, ctx, _payload, _mapping| {
                        ctx.unbecome();
                    },
                )
                .build()
        }
    }

    let system = ActorSystem::new(SystemConfig::default());
    let handle = system
        .spawn(Switching {
            hits: Arc::clone(&hits),
        })
        .unwrap();

    system.send(&handle, Tuple::from_static((1i32,))).unwrap();
    settle().await;
    assert_eq!(hits.load(Ordering::SeqCst), 1);

    system
        .send(&handle, Tuple::from_static(("become-empty".to_string(),)))
        .unwrap();
    settle().await;
    // The replaced behavior was discarded, not stacked; `unbecome` has
    // nothing earlier to return to, since the bottom frame itself changed.
    system.send(&handle, Tuple::from_static((true,))).unwrap();
    settle().await;
    system.send(&handle, Tuple::from_static((2i32,))).unwrap();
    settle().await;
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

// --- P6: match-cache bookkeeping is an implementation detail, checked
// directly against the cache rather than through the scheduler. -----------

#[test]
fn p6_match_cache_is_invalidated_on_become() {
    let patterns = vec![Pattern::new(vec![Slot::typed::<i32>()]).unwrap()];
    let token = Tuple::from_static((1i32,)).type_token().unwrap();

    let mut cache = MatchCache::new();
    cache.candidates(token, &patterns);
    assert_eq!(cache.len(), 1);
    cache.invalidate();
    assert!(cache.is_empty());
}

#[test]
fn mailbox_cache_preserves_fifo_order_on_drain() {
    let mut cache = MessageCache::new();
    cache.push(Envelope::new(Tuple::from_static((1i32,))));
    cache.push(Envelope::new(Tuple::from_static((2i32,))));

    let drained: Vec<_> = cache.drain().collect();
    assert_eq!(drained[0].payload.get::<i32>(0), Some(&1));
    assert_eq!(drained[1].payload.get::<i32>(0), Some(&2));
}
