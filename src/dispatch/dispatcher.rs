//! Runtime dispatch: `step` and `enter`.

use crate::core::{DescriptorEntry, EventId, StateId};
use crate::dispatch::table::TransitionTable;

/// What a call to [`TransitionTable::step`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dispatch {
    /// No transition is declared for the state and event; nothing changed.
    Ignored,
    /// The transition's handler ran and decided what to do with the state.
    Handled,
    /// The declared destination was entered.
    Entered(StateId),
}

impl<'d, C> TransitionTable<'d, C> {
    /// Feed `event` to the instance whose state is `current`.
    ///
    /// - With no declared transition the call is a no-op.
    /// - A transition declared with a handler runs the handler and leaves
    ///   `current` alone; the handler calls [`Self::enter`] if it wants to
    ///   move.
    /// - Otherwise the declared destination is entered.
    ///
    /// # Panics
    ///
    /// Panics if `current` or `event` is outside the table's limits.
    pub fn step(&self, current: &mut StateId, event: EventId, context: &mut C) -> Dispatch {
        let Some(position) = self.cell(*current, event) else {
            tracing::trace!(
                table = %self.name(),
                state = self.state_name(*current),
                event = self.event_name(event),
                "no transition"
            );
            return Dispatch::Ignored;
        };

        let DescriptorEntry::Next { next, handler, .. } = &self.descriptors()[position] else {
            unreachable!(
                "table '{}': cell for {} / {} points at a non-transition descriptor {position}",
                self.name(),
                *current,
                event
            );
        };

        match handler {
            Some(handler) => {
                handler.call(self, current, event, context);
                Dispatch::Handled
            }
            None => {
                self.enter(current, *next, event, context);
                Dispatch::Entered(*next)
            }
        }
    }

    /// Move the instance to `next` unconditionally.
    ///
    /// The logger, if any, sees the transition before `current` changes;
    /// the entry-handler of `next`, if any, runs after.
    ///
    /// # Panics
    ///
    /// Panics if `current`, `next` or `event` is outside the table's limits.
    pub fn enter(&self, current: &mut StateId, next: StateId, event: EventId, context: &mut C) {
        self.check_state(*current);
        self.check_state(next);
        self.check_event(event);

        let event_name = self.event_name(event);
        let from = self.state_name(*current);
        let to = self.state_name(next);

        if let Some(logger) = self.logger() {
            let message = format!("event {event_name} state {from} -> {to}");
            logger.log(context, &message);
        }
        tracing::trace!(table = %self.name(), event = event_name, from, to, "enter");

        *current = next;

        if let Some(handler) = self.entry_handler(next) {
            handler.call(self, current, event, context);
        }
    }
}
