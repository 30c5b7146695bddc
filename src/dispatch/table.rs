//! The built, immutable transition table.

use crate::builder::{IndexWidth, Limits};
use crate::core::{DescriptorEntry, EventId, Handler, Logger, StateId};
use std::fmt;
use std::num::{NonZeroU16, NonZeroU8};

/// Dense `states x events` buffer of descriptor positions.
///
/// `None` marks a cell with no declared transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum IndexBuffer {
    Narrow(Vec<Option<NonZeroU8>>),
    Wide(Vec<Option<NonZeroU16>>),
}

impl IndexBuffer {
    pub(crate) fn new(width: IndexWidth, cells: usize) -> Self {
        match width {
            IndexWidth::Narrow => Self::Narrow(vec![None; cells]),
            IndexWidth::Wide => Self::Wide(vec![None; cells]),
        }
    }

    pub(crate) fn width(&self) -> IndexWidth {
        match self {
            Self::Narrow(_) => IndexWidth::Narrow,
            Self::Wide(_) => IndexWidth::Wide,
        }
    }

    pub(crate) fn get(&self, cell: usize) -> Option<usize> {
        match self {
            Self::Narrow(cells) => cells[cell].map(|index| usize::from(index.get())),
            Self::Wide(cells) => cells[cell].map(|index| usize::from(index.get())),
        }
    }

    /// Store a `Next` descriptor position. Position 0 can never hold a
    /// `Next` in a valid description, and the validator bounds the rest.
    pub(crate) fn set(&mut self, cell: usize, position: usize) {
        match self {
            Self::Narrow(cells) => {
                let index = u8::try_from(position).ok().and_then(NonZeroU8::new);
                if index.is_none() {
                    unreachable!("descriptor {position} does not fit a narrow index");
                }
                cells[cell] = index;
            }
            Self::Wide(cells) => {
                let index = u16::try_from(position).ok().and_then(NonZeroU16::new);
                if index.is_none() {
                    unreachable!("descriptor {position} does not fit a wide index");
                }
                cells[cell] = index;
            }
        }
    }
}

/// Name and entry-handler of one state.
pub(crate) struct StateRecord<'d, C> {
    pub(crate) name: &'d str,
    pub(crate) handler: Option<&'d Handler<C>>,
}

impl<C> Default for StateRecord<'_, C> {
    fn default() -> Self {
        Self {
            name: "",
            handler: None,
        }
    }
}

/// A compiled transition table.
///
/// Built once from a descriptor slice by [`crate::builder::TableBuilder`]
/// and read-only afterwards, apart from the logger slot. The table borrows
/// the descriptors it was built from, so it cannot outlive them.
///
/// State-machine instances are plain [`StateId`] values owned by the caller;
/// the table holds no per-instance data and can drive any number of them.
pub struct TransitionTable<'d, C> {
    name: String,
    descriptors: &'d [DescriptorEntry<C>],
    limits: Limits,
    cells: IndexBuffer,
    states: Vec<StateRecord<'d, C>>,
    events: Vec<&'d str>,
    logger: Option<Logger<C>>,
}

impl<'d, C> TransitionTable<'d, C> {
    pub(crate) fn from_parts(
        name: String,
        descriptors: &'d [DescriptorEntry<C>],
        limits: Limits,
        cells: IndexBuffer,
        states: Vec<StateRecord<'d, C>>,
        events: Vec<&'d str>,
        logger: Option<Logger<C>>,
    ) -> Self {
        Self {
            name,
            descriptors,
            limits,
            cells,
            states,
            events,
            logger,
        }
    }

    /// Name given at build time.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// One more than the largest state number.
    pub fn state_limit(&self) -> usize {
        self.limits.state_limit
    }

    /// One more than the largest event number.
    pub fn event_limit(&self) -> usize {
        self.limits.event_limit
    }

    pub fn index_width(&self) -> IndexWidth {
        self.cells.width()
    }

    /// The descriptors this table was built from.
    pub fn descriptors(&self) -> &'d [DescriptorEntry<C>] {
        self.descriptors
    }

    /// Name of `state`.
    ///
    /// # Panics
    ///
    /// Panics if `state` is not below [`Self::state_limit`].
    pub fn state_name(&self, state: StateId) -> &'d str {
        self.check_state(state);
        self.states[state.index()].name
    }

    /// Name of `event`.
    ///
    /// # Panics
    ///
    /// Panics if `event` is not below [`Self::event_limit`].
    pub fn event_name(&self, event: EventId) -> &'d str {
        self.check_event(event);
        self.events[event.index()]
    }

    pub fn try_state_name(&self, state: StateId) -> Option<&'d str> {
        self.states.get(state.index()).map(|record| record.name)
    }

    pub fn try_event_name(&self, event: EventId) -> Option<&'d str> {
        self.events.get(event.index()).copied()
    }

    /// All state names, indexed by state number.
    pub fn state_names(&self) -> Vec<&'d str> {
        self.states.iter().map(|record| record.name).collect()
    }

    /// All event names, indexed by event number.
    pub fn event_names(&self) -> &[&'d str] {
        &self.events
    }

    /// Whether `state` has an entry-handler.
    pub fn has_entry_handler(&self, state: StateId) -> bool {
        self.check_state(state);
        self.states[state.index()].handler.is_some()
    }

    /// Install or replace the diagnostic logger.
    pub fn set_logger(&mut self, logger: Logger<C>) {
        self.logger = Some(logger);
    }

    pub fn clear_logger(&mut self) {
        self.logger = None;
    }

    pub fn has_logger(&self) -> bool {
        self.logger.is_some()
    }

    /// Tear the table down. Equivalent to dropping it.
    pub fn destroy(self) {
        tracing::trace!(table = %self.name, "destroying transition table");
    }

    pub(crate) fn logger(&self) -> Option<&Logger<C>> {
        self.logger.as_ref()
    }

    pub(crate) fn entry_handler(&self, state: StateId) -> Option<&'d Handler<C>> {
        self.states[state.index()].handler
    }

    /// Descriptor position stored for `(state, event)`, if any.
    pub(crate) fn cell(&self, state: StateId, event: EventId) -> Option<usize> {
        self.check_state(state);
        self.check_event(event);
        self.cells
            .get(state.index() * self.limits.event_limit + event.index())
    }

    pub(crate) fn check_state(&self, state: StateId) {
        assert!(
            state.index() < self.limits.state_limit,
            "table '{}': {state} out of range (limit {})",
            self.name,
            self.limits.state_limit
        );
    }

    pub(crate) fn check_event(&self, event: EventId) {
        assert!(
            event.index() < self.limits.event_limit,
            "table '{}': {event} out of range (limit {})",
            self.name,
            self.limits.event_limit
        );
    }
}

impl<C> fmt::Debug for TransitionTable<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionTable")
            .field("name", &self.name)
            .field("state_limit", &self.limits.state_limit)
            .field("event_limit", &self.limits.event_limit)
            .field("index_width", &self.cells.width())
            .field("has_logger", &self.logger.is_some())
            .finish()
    }
}
