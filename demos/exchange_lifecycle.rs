//! Exchange Lifecycle
//!
//! This example drives fibre-channel remote-port sessions through one
//! shared transition table.
//!
//! Key concepts:
//! - Numbered states and events declared with `numbered_enum!`
//! - Transition handlers that decide whether to move (login retries)
//! - Entry handlers that chain into a follow-up state
//! - A transition log attached as the table's logger
//!
//! Run with: cargo run --example exchange_lifecycle

use fc_fsm::core::descriptor::{from, next, next_with, on_entry};
use fc_fsm::core::{DescriptorEntry, TransitionLog};
use fc_fsm::dispatch::Dispatch;
use fc_fsm::numbered_enum;
use fc_fsm::TableBuilder;

numbered_enum! {
    enum PortState: StateId {
        Offline = 1 => "offline",
        Plogi = 2 => "plogi",
        Prli = 3 => "prli",
        Ready = 4 => "ready",
        Logo = 5 => "logo",
    }
}

numbered_enum! {
    enum PortEvent: EventId {
        Start = 1 => "start",
        Accept = 2 => "accept",
        Reject = 3 => "reject",
        Timeout = 4 => "timeout",
        Stop = 5 => "stop",
    }
}

// Per-port context
struct RemotePort {
    wwpn: u64,
    retries: u32,
    max_retries: u32,
}

fn description() -> Vec<DescriptorEntry<RemotePort>> {
    use PortEvent::*;
    use PortState::*;

    let mut descriptors = PortEvent::labels();
    descriptors.extend(PortState::labels());
    descriptors.extend([
        from(Offline),
        next(Start, Plogi),
        on_entry(Plogi, |_table, _cur, _event, port: &mut RemotePort| {
            println!("  [{:016x}] sending PLOGI", port.wwpn);
        }),
        next(Accept, Prli),
        next_with(Reject, Offline, retry),
        next_with(Timeout, Offline, retry),
        next(Stop, Logo),
        from(Prli),
        next(Accept, Ready),
        next_with(Reject, Offline, retry),
        next(Stop, Logo),
        on_entry(Ready, |_table, _cur, _event, port: &mut RemotePort| {
            port.retries = 0;
            println!("  [{:016x}] session ready", port.wwpn);
        }),
        next(Stop, Logo),
        on_entry(Logo, |table, cur, event, port: &mut RemotePort| {
            println!("  [{:016x}] logged out", port.wwpn);
            table.enter(cur, Offline.id(), event, port);
        }),
    ]);
    descriptors
}

// Re-send PLOGI until the retry budget runs out, then go offline.
fn retry(
    table: &fc_fsm::TransitionTable<'_, RemotePort>,
    cur: &mut fc_fsm::StateId,
    event: fc_fsm::EventId,
    port: &mut RemotePort,
) {
    port.retries += 1;
    if port.retries <= port.max_retries {
        println!(
            "  [{:016x}] {} in {}, retry {}/{}",
            port.wwpn,
            table.event_name(event),
            table.state_name(*cur),
            port.retries,
            port.max_retries
        );
        table.enter(cur, PortState::Plogi.id(), event, port);
    } else {
        println!("  [{:016x}] giving up", port.wwpn);
        table.enter(cur, PortState::Offline.id(), event, port);
    }
}

fn run(
    table: &fc_fsm::TransitionTable<'_, RemotePort>,
    port: &mut RemotePort,
    events: &[PortEvent],
) -> fc_fsm::StateId {
    let mut cur = PortState::Offline.id();
    for event in events {
        if table.step(&mut cur, event.id(), port) == Dispatch::Ignored {
            println!(
                "  [{:016x}] {} ignored in {}",
                port.wwpn,
                event.name(),
                table.state_name(cur)
            );
        }
    }
    cur
}

fn main() {
    println!("=== Exchange Lifecycle Example ===\n");

    let descriptors = description();
    let log = TransitionLog::new();
    let table = TableBuilder::new("rport")
        .logger(log.logger())
        .build(&descriptors)
        .unwrap();

    println!(
        "Table '{}': {} states x {} events\n",
        table.name(),
        table.state_limit(),
        table.event_limit()
    );

    // Scenario 1: clean login and logout
    println!("Scenario 1: Login");
    let mut port = RemotePort {
        wwpn: 0x2100_0024_ff4a_9b10,
        retries: 0,
        max_retries: 2,
    };
    let end = run(
        &table,
        &mut port,
        &[PortEvent::Start, PortEvent::Accept, PortEvent::Accept, PortEvent::Stop],
    );
    println!("  final state: {}\n", table.state_name(end));

    // Scenario 2: target keeps timing out
    println!("Scenario 2: Retries exhausted");
    let mut port = RemotePort {
        wwpn: 0x2100_0024_ff4a_9b11,
        retries: 0,
        max_retries: 2,
    };
    let end = run(
        &table,
        &mut port,
        &[
            PortEvent::Start,
            PortEvent::Timeout,
            PortEvent::Timeout,
            PortEvent::Timeout,
            PortEvent::Accept,
        ],
    );
    println!("  final state: {}\n", table.state_name(end));

    println!("Transition log:");
    for record in log.records() {
        println!("  {} {}", record.timestamp.format("%H:%M:%S%.3f"), record.message);
    }

    println!("\nLayout:");
    for transition in table.transitions() {
        println!(
            "  {:>8} --{:<8}--> {}{}",
            table.state_name(transition.from),
            table.event_name(transition.event),
            table.state_name(transition.next),
            if transition.overridden { " (handler)" } else { "" }
        );
    }
}
