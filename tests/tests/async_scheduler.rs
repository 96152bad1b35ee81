//! End-to-end scenarios for the asynchronous simulated scheduler.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

use chrona_kernel::{Action, ActionContext, Clock, EventScheduler};
use chrona_sim::{AsyncEventScheduler, SchedulingAction};
use chrona_testing::actions::{PanickingAction, RecordingAction};

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn single_delayed_action() {
    chrona_testing::init_tracing();

    let scheduler = AsyncEventScheduler::new(t0());
    let action = RecordingAction::arc();

    scheduler.perform_after(
        action.clone(),
        TimeDelta::minutes(1),
        CancellationToken::new(),
    );
    scheduler.forward(TimeDelta::minutes(15)).await;

    assert_eq!(action.observed(), vec![t0() + TimeDelta::minutes(1)]);
    assert_eq!(scheduler.now(), t0() + TimeDelta::minutes(15));
}

#[tokio::test(flavor = "multi_thread")]
async fn periodic_action_counted_fires() {
    let scheduler = AsyncEventScheduler::new(t0());
    let action = RecordingAction::arc();

    scheduler.perform_repeatedly(
        action.clone(),
        None,
        TimeDelta::minutes(1),
        CancellationToken::new(),
    );
    scheduler.forward(TimeDelta::minutes(60)).await;

    // Completion order is unspecified; the set of observed instants and the
    // total count are not.
    let observed: HashSet<_> = action.observed().into_iter().collect();
    let expected: HashSet<_> = (1..=60).map(|k| t0() + TimeDelta::minutes(k)).collect();
    assert_eq!(observed, expected);
    assert_eq!(action.count(), 60);
    assert_eq!(scheduler.now(), t0() + TimeDelta::minutes(60));
}

#[tokio::test(flavor = "multi_thread")]
async fn due_time_ties_complete_in_some_order() {
    struct TaggedAction {
        tag: &'static str,
        log: Arc<Mutex<Vec<&'static str>>>,
    }

    #[async_trait]
    impl Action for TaggedAction {
        async fn perform(&self, _ctx: Box<dyn ActionContext>) {
            self.log.lock().push(self.tag);
        }
    }

    let log = Arc::new(Mutex::new(Vec::new()));
    let scheduler = AsyncEventScheduler::new(t0());

    for tag in ["a", "b"] {
        scheduler.perform_after(
            Arc::new(TaggedAction {
                tag,
                log: Arc::clone(&log),
            }),
            TimeDelta::milliseconds(1),
            CancellationToken::new(),
        );
    }

    scheduler.forward(TimeDelta::milliseconds(2)).await;

    // Both fired exactly once; completion order is left to the workers.
    let completed: HashSet<_> = log.lock().iter().copied().collect();
    assert_eq!(completed, HashSet::from(["a", "b"]));
}

#[tokio::test(flavor = "multi_thread")]
async fn recursive_scheduling_with_the_scheduling_action_wrapper() {
    struct OuterAction {
        scheduler: Arc<AsyncEventScheduler>,
        inner: Arc<RecordingAction>,
    }

    #[async_trait]
    impl Action for OuterAction {
        async fn perform(&self, ctx: Box<dyn ActionContext>) {
            self.scheduler.perform_after(
                self.inner.clone(),
                TimeDelta::seconds(1),
                CancellationToken::new(),
            );
            // Lets the parked event loop look at the combinator again.
            ctx.done_scheduling_new_events();
        }
    }

    let scheduler = Arc::new(AsyncEventScheduler::new(t0()));
    let inner = RecordingAction::arc();

    scheduler.perform_after(
        Arc::new(SchedulingAction::new(Arc::new(OuterAction {
            scheduler: Arc::clone(&scheduler),
            inner: inner.clone(),
        }))),
        TimeDelta::seconds(1),
        CancellationToken::new(),
    );

    scheduler.forward(TimeDelta::seconds(3)).await;

    // The inner action was visible to the loop and fired at T0+2s.
    assert_eq!(inner.observed(), vec![t0() + TimeDelta::seconds(2)]);
    assert_eq!(scheduler.now(), t0() + TimeDelta::seconds(3));
}

#[tokio::test(flavor = "multi_thread")]
#[should_panic(expected = "worker went down")]
async fn first_action_failure_surfaces_from_forward() {
    let scheduler = AsyncEventScheduler::new(t0());

    scheduler.perform_after(
        Arc::new(PanickingAction::new("worker went down")),
        TimeDelta::seconds(1),
        CancellationToken::new(),
    );

    scheduler.forward(TimeDelta::seconds(2)).await;
}

#[tokio::test(flavor = "multi_thread")]
async fn cancellation_mid_stream() {
    let scheduler = AsyncEventScheduler::new(t0());
    let action = RecordingAction::arc();

    let cancellation = CancellationToken::new();
    scheduler.perform_repeatedly(
        action.clone(),
        None,
        TimeDelta::seconds(1),
        cancellation.clone(),
    );

    scheduler.forward(TimeDelta::seconds(3)).await;
    cancellation.cancel();
    scheduler.forward(TimeDelta::seconds(10)).await;

    assert_eq!(action.count(), 3);
    assert_eq!(scheduler.now(), t0() + TimeDelta::seconds(13));
}

#[tokio::test(flavor = "multi_thread")]
async fn forward_zero_launches_events_due_exactly_now() {
    let scheduler = AsyncEventScheduler::new(t0());
    let action = RecordingAction::arc();

    scheduler.perform_now(action.clone(), CancellationToken::new());
    scheduler.forward(TimeDelta::zero()).await;

    assert_eq!(action.observed(), vec![t0()]);
    assert_eq!(scheduler.now(), t0());
}
