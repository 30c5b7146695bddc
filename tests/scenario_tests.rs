//! Scenario tests: small protocol state machines driven end to end.

use fc_fsm::builder::{BuildOptions, DescriptorError, DuplicatePolicy, IndexWidth, TableBuilder};
use fc_fsm::core::descriptor::{end, event, from, next, next_with, on_entry, state};
use fc_fsm::core::{DescriptorEntry, EventId, StateId, TransitionLog};
use fc_fsm::dispatch::Dispatch;
use fc_fsm::{build, numbered_enum};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

const A: StateId = StateId::new(1);
const B: StateId = StateId::new(2);
const GO: EventId = EventId::new(1);

fn two_state_description() -> Vec<DescriptorEntry<()>> {
    vec![event(GO, "GO"), state(A, "A"), next(GO, B), state(B, "B"), end()]
}

#[test]
fn forward_transition_is_followed() {
    let descriptors = two_state_description();
    let table = build("two-state", &descriptors).unwrap();

    let mut cur = A;
    table.step(&mut cur, GO, &mut ());

    assert_eq!(cur, B);
}

#[test]
fn missing_transition_leaves_state_alone() {
    let descriptors = two_state_description();
    let table = build("two-state", &descriptors).unwrap();

    let mut cur = B;
    assert_eq!(table.step(&mut cur, GO, &mut ()), Dispatch::Ignored);

    assert_eq!(cur, B);
}

#[test]
fn handler_transition_is_left_to_the_handler() {
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&calls);
    let descriptors: Vec<DescriptorEntry<()>> = vec![
        event(GO, "GO"),
        state(A, "A"),
        next_with(GO, B, move |_table, _cur, _event, _ctx: &mut ()| {
            seen.fetch_add(1, Ordering::SeqCst);
        }),
        state(B, "B"),
    ];
    let table = build("guarded", &descriptors).unwrap();

    let mut cur = A;
    assert_eq!(table.step(&mut cur, GO, &mut ()), Dispatch::Handled);

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(cur, A);
}

numbered_enum! {
    /// States of a fibre-channel exchange.
    enum ExchState: StateId {
        Idle = 1 => "idle",
        Open = 2 => "open",
        Seq = 3 => "sequence",
        Abort = 4 => "abort",
        Done = 5 => "done",
    }
}

numbered_enum! {
    enum ExchEvent: EventId {
        Request = 1 => "request",
        Recv = 2 => "recv",
        Last = 3 => "last",
        Timeout = 4 => "timeout",
        Ack = 5 => "ack",
    }
}

#[derive(Default)]
struct Exchange {
    retries: u32,
    max_retries: u32,
    completions: u32,
    aborts: u32,
}

fn exchange_description() -> Vec<DescriptorEntry<Exchange>> {
    use ExchEvent::*;
    use ExchState::*;

    let mut descriptors = ExchEvent::labels();
    descriptors.extend(ExchState::labels());
    descriptors.extend([
        from(Idle),
        next(Request, Open),
        from(Open),
        next(Recv, Seq),
        next(Last, Done),
        next_with(Timeout, Abort, |table, cur, event, exch: &mut Exchange| {
            exch.retries += 1;
            if exch.retries > exch.max_retries {
                table.enter(cur, Abort.id(), event, exch);
            }
        }),
        from(Seq),
        next(Recv, Seq),
        next(Last, Done),
        next(Timeout, Abort),
        on_entry(Abort, |_table, _cur, _event, exch: &mut Exchange| exch.aborts += 1),
        next(Ack, Idle),
        on_entry(Done, |table, cur, event, exch: &mut Exchange| {
            exch.completions += 1;
            table.enter(cur, Idle.id(), event, exch);
        }),
    ]);
    descriptors
}

#[test]
fn exchange_runs_to_completion_and_recycles() {
    let descriptors = exchange_description();
    let mut table = build("exchange", &descriptors).unwrap();
    let log = TransitionLog::new();
    table.set_logger(log.logger());

    let mut exch = Exchange::default();
    let mut cur = ExchState::Idle.id();
    for ev in [ExchEvent::Request, ExchEvent::Recv, ExchEvent::Recv, ExchEvent::Last] {
        table.step(&mut cur, ev.id(), &mut exch);
    }

    assert_eq!(ExchState::try_from(cur), Ok(ExchState::Idle));
    assert_eq!(exch.completions, 1);
    assert_eq!(
        log.messages(),
        [
            "event request state idle -> open",
            "event recv state open -> sequence",
            "event recv state sequence -> sequence",
            "event last state sequence -> done",
            "event last state done -> idle",
        ]
    );
}

#[test]
fn exchange_timeouts_retry_then_abort() {
    let descriptors = exchange_description();
    let table = build("exchange", &descriptors).unwrap();
    let mut exch = Exchange {
        max_retries: 2,
        ..Exchange::default()
    };
    let mut cur = ExchState::Open.id();

    table.step(&mut cur, ExchEvent::Timeout.id(), &mut exch);
    table.step(&mut cur, ExchEvent::Timeout.id(), &mut exch);
    assert_eq!(cur, ExchState::Open.id());
    assert_eq!(exch.aborts, 0);

    table.step(&mut cur, ExchEvent::Timeout.id(), &mut exch);
    assert_eq!(cur, ExchState::Abort.id());
    assert_eq!(exch.aborts, 1);

    assert_eq!(
        table.step(&mut cur, ExchEvent::Ack.id(), &mut exch),
        Dispatch::Entered(ExchState::Idle.id())
    );
}

#[test]
fn one_table_drives_many_instances_across_threads() {
    let descriptors = exchange_description();
    let table = build("exchange", &descriptors).unwrap();

    let finished: Vec<StateId> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|worker| {
                let table = &table;
                scope.spawn(move || {
                    let mut exch = Exchange::default();
                    let mut cur = ExchState::Idle.id();
                    table.step(&mut cur, ExchEvent::Request.id(), &mut exch);
                    for _ in 0..worker {
                        table.step(&mut cur, ExchEvent::Recv.id(), &mut exch);
                    }
                    cur
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(
        finished,
        vec![
            ExchState::Open.id(),
            ExchState::Seq.id(),
            ExchState::Seq.id(),
            ExchState::Seq.id(),
        ]
    );
}

#[test]
fn summary_describes_exchange_layout() {
    let descriptors = exchange_description();
    let table = build("exchange", &descriptors).unwrap();

    let summary = table.summary();

    assert_eq!(summary.state_limit, 6);
    assert_eq!(summary.event_limit, 6);
    assert_eq!(
        summary.entry_handlers,
        vec![ExchState::Abort.id(), ExchState::Done.id()]
    );
    assert_eq!(summary.transitions.len(), 8);
    assert!(summary
        .transitions
        .iter()
        .any(|t| t.from == ExchState::Open.id() && t.event == ExchEvent::Timeout.id() && t.overridden));
}

#[test]
fn wide_tables_hold_what_narrow_tables_cannot() {
    let mut descriptors: Vec<DescriptorEntry<()>> = Vec::new();
    for number in 1..=40u16 {
        descriptors.push(event(EventId::new(number), format!("ev{number}")));
    }
    for number in 1..=40u16 {
        descriptors.push(state(StateId::new(number), format!("st{number}")));
        descriptors.push(next(EventId::new(number), StateId::new(number % 40 + 1)));
    }

    let narrow = build("ring", &descriptors).unwrap_err();
    assert!(narrow
        .errors()
        .iter()
        .any(|e| matches!(e, DescriptorError::DescriptorCapacityExceeded { capacity: 256, .. })));

    let table = TableBuilder::new("ring")
        .index_width(IndexWidth::Wide)
        .build(&descriptors)
        .unwrap();
    let mut cur = StateId::new(40);
    table.step(&mut cur, EventId::new(40), &mut ());
    assert_eq!(cur, StateId::new(1));
}

#[test]
fn options_from_config_allow_overrides() {
    let options: BuildOptions =
        serde_json::from_str(r#"{ "duplicates": "last_write_wins" }"#).unwrap();
    assert_eq!(options.duplicates, DuplicatePolicy::LastWriteWins);

    let descriptors: Vec<DescriptorEntry<()>> = vec![
        event(GO, "GO"),
        state(A, "A"),
        next(GO, B),
        state(B, "B"),
        from(A),
        next(GO, A),
    ];

    let table = TableBuilder::new("override")
        .options(options)
        .build(&descriptors)
        .unwrap();
    let mut cur = A;
    table.step(&mut cur, GO, &mut ());
    assert_eq!(cur, A);

    let strict = build("override", &descriptors).unwrap_err();
    assert_eq!(strict.errors().len(), 1);
}

#[test]
fn destroy_consumes_the_table() {
    let descriptors = two_state_description();
    let table = build("short-lived", &descriptors).unwrap();
    table.destroy();
    // Descriptors outlive the table that borrowed them.
    assert_eq!(descriptors.len(), 5);
}
