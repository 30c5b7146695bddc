//! First pass over a transition description.
//!
//! The validator walks the descriptors once, tracking the current-state
//! context and the largest state and event numbers, and collects every
//! problem it sees instead of stopping at the first one.

use crate::builder::error::DescriptorError;
use crate::builder::options::{BuildOptions, DuplicatePolicy};
use crate::core::{DescriptorEntry, EventId, StateId};
use std::collections::HashMap;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Sizes computed by a successful validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Limits {
    /// One more than the largest declared state number.
    pub state_limit: usize,
    /// One more than the largest declared event number.
    pub event_limit: usize,
    /// Number of descriptors before `End` (or the slice length).
    pub descriptor_count: usize,
}

impl Limits {
    /// Size of the dense table, `None` if it does not fit in `usize`.
    pub fn cells(&self) -> Option<usize> {
        self.state_limit.checked_mul(self.event_limit)
    }
}

/// Number of descriptors that take part in a build.
fn descriptor_count<C>(descriptors: &[DescriptorEntry<C>]) -> usize {
    descriptors
        .iter()
        .position(DescriptorEntry::is_end)
        .unwrap_or(descriptors.len())
}

struct Transition {
    position: usize,
    from: Option<StateId>,
    event: EventId,
    next: StateId,
}

/// Validate a description, accumulating ALL problems.
///
/// Returns the computed [`Limits`] on success.
pub fn validate<C>(
    descriptors: &[DescriptorEntry<C>],
    options: &BuildOptions,
) -> Validation<Limits, NonEmptyVec<DescriptorError>> {
    let mut checks: Vec<Validation<(), NonEmptyVec<DescriptorError>>> = Vec::new();
    let mut reject = |error: DescriptorError| checks.push(Validation::fail(error));

    let descriptor_count = descriptor_count(descriptors);
    let mut current: Option<StateId> = None;
    let mut max_state = 0u16;
    let mut max_event = 0u16;
    // Last label wins; `false` records a label with an empty name.
    let mut state_named: HashMap<StateId, bool> = HashMap::new();
    let mut event_named: HashMap<EventId, bool> = HashMap::new();
    let mut transitions = Vec::new();

    for (position, entry) in descriptors[..descriptor_count].iter().enumerate() {
        match entry {
            DescriptorEntry::End => break,
            DescriptorEntry::StateLabel { state, name } => {
                current = context_state(*state, position, entry.kind(), &mut reject);
                if current.is_some() {
                    max_state = max_state.max(state.get());
                    state_named.insert(*state, !name.is_empty());
                }
            }
            DescriptorEntry::Handler { state, .. } | DescriptorEntry::From { state } => {
                current = context_state(*state, position, entry.kind(), &mut reject);
                if current.is_some() {
                    max_state = max_state.max(state.get());
                }
            }
            DescriptorEntry::EventLabel { event, name } => {
                if event.is_none() {
                    reject(DescriptorError::Reserved0Used {
                        position,
                        kind: entry.kind(),
                    });
                } else {
                    max_event = max_event.max(event.get());
                    event_named.insert(*event, !name.is_empty());
                }
            }
            DescriptorEntry::Next { event, next, .. } => {
                if event.is_none() {
                    reject(DescriptorError::Reserved0Used {
                        position,
                        kind: entry.kind(),
                    });
                } else if !event_named.contains_key(event) {
                    reject(DescriptorError::EventUndeclared {
                        position,
                        event: *event,
                    });
                }
                if current.is_none() {
                    reject(DescriptorError::MissingCurrentState { position });
                }
                transitions.push(Transition {
                    position,
                    from: current,
                    event: *event,
                    next: *next,
                });
            }
        }
    }

    let limits = Limits {
        state_limit: usize::from(max_state) + 1,
        event_limit: usize::from(max_event) + 1,
        descriptor_count,
    };

    // Destinations may be labelled after the transition that names them.
    for transition in &transitions {
        if transition.next.is_none() || transition.next.index() >= limits.state_limit {
            reject(DescriptorError::StateOutOfRange {
                position: transition.position,
                state: transition.next,
                limit: limits.state_limit,
            });
        }
    }

    let capacity = options.index_width.capacity();
    if let Some(error) = check_cells(&limits, capacity) {
        reject(error);
    }
    if let Some(last) = transitions.last() {
        if last.position >= capacity {
            reject(DescriptorError::DescriptorCapacityExceeded {
                required: last.position + 1,
                capacity,
            });
        }
    }

    for number in 1..=max_state {
        let state = StateId::new(number);
        if !state_named.get(&state).copied().unwrap_or(false) {
            reject(DescriptorError::UnnamedState { state });
        }
    }
    for number in 1..=max_event {
        let event = EventId::new(number);
        if !event_named.get(&event).copied().unwrap_or(false) {
            reject(DescriptorError::UnnamedEvent { event });
        }
    }

    if options.duplicates == DuplicatePolicy::Reject {
        let mut seen: HashMap<(StateId, EventId), usize> = HashMap::new();
        for transition in &transitions {
            let Some(from) = transition.from else {
                continue;
            };
            if transition.event.is_none() {
                continue;
            }
            if let Some(first) = seen.insert((from, transition.event), transition.position) {
                reject(DescriptorError::DuplicateTransition {
                    position: transition.position,
                    first,
                    state: from,
                    event: transition.event,
                });
            }
        }
    }

    Validation::all_vec(checks).map(move |_| limits)
}

/// The dense table must fit the index width; an overflowing size never does.
fn check_cells(limits: &Limits, capacity: usize) -> Option<DescriptorError> {
    match limits.cells() {
        Some(cells) if cells <= capacity => None,
        cells => Some(DescriptorError::DescriptorCapacityExceeded {
            required: cells.unwrap_or(usize::MAX),
            capacity,
        }),
    }
}

/// Resolve the context set by a state-declaring entry; 0 clears it.
fn context_state(
    state: StateId,
    position: usize,
    kind: &'static str,
    reject: &mut impl FnMut(DescriptorError),
) -> Option<StateId> {
    if state.is_none() {
        reject(DescriptorError::Reserved0Used { position, kind });
        None
    } else {
        Some(state)
    }
}
