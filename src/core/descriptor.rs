//! The compact transition description language.
//!
//! A description is an ordered slice of [`DescriptorEntry`] values. Labels
//! and handlers set the "current state" context that subsequent
//! [`DescriptorEntry::Next`] entries attach to.
//!
//! # Example
//!
//! ```rust
//! use fc_fsm::core::descriptor::{end, event, next, state};
//! use fc_fsm::core::DescriptorEntry;
//!
//! const A: u16 = 1;
//! const B: u16 = 2;
//! const GO: u16 = 1;
//!
//! let description: Vec<DescriptorEntry<()>> = vec![
//!     event(GO, "go"),
//!     state(A, "a"),
//!     next(GO, B),
//!     state(B, "b"),
//!     end(),
//! ];
//! assert_eq!(description.len(), 5);
//! ```

use crate::core::handler::Handler;
use crate::core::ids::{EventId, StateId};
use std::borrow::Cow;

/// One entry of a transition description.
#[derive(Debug)]
pub enum DescriptorEntry<C> {
    /// Terminates the description; anything after it is ignored.
    End,

    /// Declares a state and makes it the current state.
    StateLabel {
        state: StateId,
        name: Cow<'static, str>,
    },

    /// Declares an event.
    EventLabel {
        event: EventId,
        name: Cow<'static, str>,
    },

    /// Attaches an entry-handler to a state and makes it the current state.
    Handler { state: StateId, handler: Handler<C> },

    /// Makes a previously declared state the current state.
    From { state: StateId },

    /// Declares a transition from the current state on `event`.
    ///
    /// With a handler, dispatch calls the handler instead of moving to
    /// `next`; the handler decides whether to enter a state itself.
    Next {
        event: EventId,
        next: StateId,
        handler: Option<Handler<C>>,
    },
}

impl<C> DescriptorEntry<C> {
    pub fn is_end(&self) -> bool {
        matches!(self, Self::End)
    }

    /// Short tag used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::End => "end",
            Self::StateLabel { .. } => "state",
            Self::EventLabel { .. } => "event",
            Self::Handler { .. } => "handler",
            Self::From { .. } => "from",
            Self::Next { .. } => "next",
        }
    }
}

impl<C> Clone for DescriptorEntry<C> {
    fn clone(&self) -> Self {
        match self {
            Self::End => Self::End,
            Self::StateLabel { state, name } => Self::StateLabel {
                state: *state,
                name: name.clone(),
            },
            Self::EventLabel { event, name } => Self::EventLabel {
                event: *event,
                name: name.clone(),
            },
            Self::Handler { state, handler } => Self::Handler {
                state: *state,
                handler: handler.clone(),
            },
            Self::From { state } => Self::From { state: *state },
            Self::Next {
                event,
                next,
                handler,
            } => Self::Next {
                event: *event,
                next: *next,
                handler: handler.clone(),
            },
        }
    }
}

pub fn end<C>() -> DescriptorEntry<C> {
    DescriptorEntry::End
}

pub fn state<C>(
    state: impl Into<StateId>,
    name: impl Into<Cow<'static, str>>,
) -> DescriptorEntry<C> {
    DescriptorEntry::StateLabel {
        state: state.into(),
        name: name.into(),
    }
}

pub fn event<C>(
    event: impl Into<EventId>,
    name: impl Into<Cow<'static, str>>,
) -> DescriptorEntry<C> {
    DescriptorEntry::EventLabel {
        event: event.into(),
        name: name.into(),
    }
}

/// Entry-handler for `state`, built from a closure.
pub fn on_entry<C, F>(state: impl Into<StateId>, func: F) -> DescriptorEntry<C>
where
    F: Fn(&crate::dispatch::TransitionTable<'_, C>, &mut StateId, EventId, &mut C)
        + Send
        + Sync
        + 'static,
{
    DescriptorEntry::Handler {
        state: state.into(),
        handler: Handler::new(func),
    }
}

pub fn from<C>(state: impl Into<StateId>) -> DescriptorEntry<C> {
    DescriptorEntry::From {
        state: state.into(),
    }
}

pub fn next<C>(event: impl Into<EventId>, next: impl Into<StateId>) -> DescriptorEntry<C> {
    DescriptorEntry::Next {
        event: event.into(),
        next: next.into(),
        handler: None,
    }
}

/// A `Next` entry whose handler overrides the automatic transition.
pub fn next_with<C, F>(
    event: impl Into<EventId>,
    next: impl Into<StateId>,
    func: F,
) -> DescriptorEntry<C>
where
    F: Fn(&crate::dispatch::TransitionTable<'_, C>, &mut StateId, EventId, &mut C)
        + Send
        + Sync
        + 'static,
{
    DescriptorEntry::Next {
        event: event.into(),
        next: next.into(),
        handler: Some(Handler::new(func)),
    }
}
