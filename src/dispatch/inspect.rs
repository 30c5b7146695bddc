//! Read-only views of a built table.

use crate::builder::IndexWidth;
use crate::core::{DescriptorEntry, EventId, StateId};
use crate::dispatch::table::TransitionTable;
use serde::Serialize;

/// A declared transition, as seen from its dense-table cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TransitionRef {
    pub from: StateId,
    pub event: EventId,
    /// Declared destination. Only entered automatically when
    /// `overridden` is false.
    pub next: StateId,
    /// The descriptor carries a handler that replaces the automatic move.
    pub overridden: bool,
    /// Position of the `Next` descriptor in the description.
    pub position: usize,
}

/// Serializable snapshot of a table's layout.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TableSummary {
    pub name: String,
    pub state_limit: usize,
    pub event_limit: usize,
    pub index_width: IndexWidth,
    pub states: Vec<String>,
    pub events: Vec<String>,
    pub entry_handlers: Vec<StateId>,
    pub transitions: Vec<TransitionRef>,
}

impl<'d, C> TransitionTable<'d, C> {
    /// The transition declared for `(state, event)`, without dispatching.
    ///
    /// # Panics
    ///
    /// Panics if `state` or `event` is outside the table's limits.
    pub fn lookup(&self, state: StateId, event: EventId) -> Option<TransitionRef> {
        let position = self.cell(state, event)?;
        let DescriptorEntry::Next { next, handler, .. } = &self.descriptors()[position] else {
            unreachable!(
                "table '{}': cell for {state} / {event} points at a non-transition descriptor {position}",
                self.name()
            );
        };
        Some(TransitionRef {
            from: state,
            event,
            next: *next,
            overridden: handler.is_some(),
            position,
        })
    }

    /// Every declared transition, ordered by state then event.
    pub fn transitions(&self) -> impl Iterator<Item = TransitionRef> + '_ {
        let events = self.event_limit();
        (1..self.state_limit()).flat_map(move |state| {
            (1..events).filter_map(move |event| {
                self.lookup(StateId::new(state as u16), EventId::new(event as u16))
            })
        })
    }

    pub fn summary(&self) -> TableSummary {
        let entry_handlers = (1..self.state_limit())
            .map(|state| StateId::new(state as u16))
            .filter(|state| self.has_entry_handler(*state))
            .collect();

        TableSummary {
            name: self.name().to_string(),
            state_limit: self.state_limit(),
            event_limit: self.event_limit(),
            index_width: self.index_width(),
            states: self.state_names().into_iter().map(str::to_string).collect(),
            events: self.event_names().iter().map(|name| name.to_string()).collect(),
            entry_handlers,
            transitions: self.transitions().collect(),
        }
    }
}
