//! Bounded-counter scenarios driven end to end through the engine.

use samloop::{
    ActionRequest, Engine, EngineBuilder, Proposal, StateDefinition, StateIdentity, StepSnapshot,
    Subscription,
};
use serde::Serialize;
use std::sync::{Arc, Mutex};

const COUNT_MAX: i64 = 10;

#[derive(Clone, Debug, Serialize, PartialEq)]
struct CounterModel {
    count: i64,
}

#[derive(Clone, Debug)]
enum CounterAction {
    Increment,
    Decrement,
}

impl ActionRequest for CounterAction {
    fn id(&self) -> &str {
        match self {
            Self::Increment => "increment",
            Self::Decrement => "decrement",
        }
    }
}

#[derive(Clone, Debug)]
struct ChangeCount {
    delta: i64,
}

impl Proposal for ChangeCount {
    fn id(&self) -> &str {
        "change-count"
    }
}

#[derive(Clone, Debug, PartialEq)]
enum CounterState {
    ShowCount,
    MaxCount,
}

impl StateIdentity for CounterState {
    fn id(&self) -> &str {
        match self {
            Self::ShowCount => "show-count",
            Self::MaxCount => "max-count",
        }
    }
}

type CounterEngine = Engine<CounterModel, ChangeCount, CounterAction, CounterState>;
type Seen = Arc<Mutex<Vec<(CounterModel, CounterState)>>>;

fn counter_engine(initial: i64, debug: bool) -> (CounterEngine, Seen) {
    let seen: Seen = Arc::default();
    let sink = Arc::clone(&seen);
    let subscription: Subscription<CounterModel, CounterState> =
        Arc::new(move |model: &CounterModel, state: &CounterState| {
            sink.lock().unwrap().push((model.clone(), state.clone()));
        });

    let engine = EngineBuilder::new()
        .model(CounterModel { count: initial })
        .proposal_factory(|action: CounterAction| async move {
            match action {
                CounterAction::Increment => Some(ChangeCount { delta: 1 }),
                CounterAction::Decrement => Some(ChangeCount { delta: -1 }),
            }
        })
        .presenter(|proposal: ChangeCount, model: CounterModel| {
            let next = model.count + proposal.delta;
            (0..=COUNT_MAX)
                .contains(&next)
                .then_some(CounterModel { count: next })
        })
        .state(StateDefinition::new(
            CounterState::ShowCount,
            |m: &CounterModel| m.count < COUNT_MAX,
        ))
        .state(StateDefinition::new(
            CounterState::MaxCount,
            |m: &CounterModel| m.count == COUNT_MAX,
        ))
        .subscription(subscription)
        .debug(debug)
        .build()
        .unwrap();

    (engine, seen)
}

fn last_seen(seen: &Seen) -> (CounterModel, CounterState) {
    seen.lock().unwrap().last().cloned().unwrap()
}

#[tokio::test]
async fn ten_increments_reach_max_count() {
    let (engine, seen) = counter_engine(0, false);

    for _ in 0..10 {
        engine.execute(CounterAction::Increment).await.unwrap();
    }

    assert_eq!(
        last_seen(&seen),
        (CounterModel { count: 10 }, CounterState::MaxCount)
    );
    // Construction plus ten transitions.
    assert_eq!(seen.lock().unwrap().len(), 11);
}

#[tokio::test]
async fn increment_at_the_bound_is_rejected_silently() {
    let (engine, seen) = counter_engine(0, true);

    for _ in 0..10 {
        engine.execute(CounterAction::Increment).await.unwrap();
    }
    let transitions_before = seen.lock().unwrap().len();

    // Out of range: the presenter declines, nothing transitions, no error.
    engine.execute(CounterAction::Increment).await.unwrap();

    assert_eq!(seen.lock().unwrap().len(), transitions_before);
    assert_eq!(
        last_seen(&seen),
        (CounterModel { count: 10 }, CounterState::MaxCount)
    );
    assert!(engine
        .history()
        .iter()
        .any(|entry| matches!(entry.snapshot, StepSnapshot::NoModel { .. })));
}

#[tokio::test]
async fn decrement_from_max_returns_to_show_count() {
    let (engine, seen) = counter_engine(10, false);
    assert_eq!(engine.initial_state(), CounterState::MaxCount);

    engine.execute(CounterAction::Decrement).await.unwrap();

    assert_eq!(
        last_seen(&seen),
        (CounterModel { count: 9 }, CounterState::ShowCount)
    );
}

#[tokio::test]
async fn initial_getters_round_trip() {
    let (engine, _seen) = counter_engine(0, false);

    engine.execute(CounterAction::Increment).await.unwrap();
    engine.execute(CounterAction::Increment).await.unwrap();

    assert_eq!(engine.initial_model(), CounterModel { count: 0 });
    assert_eq!(engine.initial_state(), CounterState::ShowCount);
}
