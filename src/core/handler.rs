//! Callables attached to descriptors and tables.
//!
//! Handlers are the only place a protocol module's own logic runs during
//! dispatch. They receive the table that invoked them, the instance's state
//! variable, the event being processed and the caller's opaque context, so a
//! guarded handler can decide for itself whether to call
//! [`TransitionTable::enter`].

use crate::core::ids::{EventId, StateId};
use crate::dispatch::TransitionTable;
use std::fmt;
use std::sync::Arc;

type HandlerFn<C> = dyn Fn(&TransitionTable<'_, C>, &mut StateId, EventId, &mut C) + Send + Sync;

type LoggerFn<C> = dyn Fn(&C, &str) + Send + Sync;

/// Callable run on a `Next` override or on entry to a state.
///
/// # Example
///
/// ```rust
/// use fc_fsm::core::{EventId, Handler, StateId};
///
/// struct Session {
///     retries: u32,
/// }
///
/// // Count the retry, then move on unconditionally.
/// let retry: Handler<Session> = Handler::new(|table, state, event, session: &mut Session| {
///     session.retries += 1;
///     table.enter(state, StateId::new(2), event, session);
/// });
/// ```
pub struct Handler<C> {
    func: Arc<HandlerFn<C>>,
}

impl<C> Handler<C> {
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(&TransitionTable<'_, C>, &mut StateId, EventId, &mut C) + Send + Sync + 'static,
    {
        Handler {
            func: Arc::new(func),
        }
    }

    /// Run the handler.
    pub fn call(
        &self,
        table: &TransitionTable<'_, C>,
        state: &mut StateId,
        event: EventId,
        context: &mut C,
    ) {
        (self.func)(table, state, event, context)
    }
}

impl<C> Clone for Handler<C> {
    fn clone(&self) -> Self {
        Self {
            func: Arc::clone(&self.func),
        }
    }
}

impl<C> fmt::Debug for Handler<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Handler(..)")
    }
}

/// Diagnostic callback invoked on every forced transition.
///
/// Receives the caller's context and a pre-formatted message. The engine
/// never writes to a transport itself; wiring the message to a host facility
/// is up to the callback.
pub struct Logger<C> {
    func: Arc<LoggerFn<C>>,
}

impl<C> Logger<C> {
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(&C, &str) + Send + Sync + 'static,
    {
        Logger {
            func: Arc::new(func),
        }
    }

    pub fn log(&self, context: &C, message: &str) {
        (self.func)(context, message)
    }
}

impl<C> Clone for Logger<C> {
    fn clone(&self) -> Self {
        Self {
            func: Arc::clone(&self.func),
        }
    }
}

impl<C> fmt::Debug for Logger<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Logger(..)")
    }
}
