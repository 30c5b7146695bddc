//! fc-fsm: a data-driven finite-state dispatch engine
//!
//! Protocol modules (fibre-channel sessions, exchanges and the like) describe
//! their state machines as a compact list of descriptors. The builder
//! validates the description and compiles it into a dense
//! `states x events` table; the dispatcher then drives any number of
//! caller-owned state variables through it in O(1) per event.
//!
//! # Core Concepts
//!
//! - **Descriptors**: state/event labels, entry-handlers and transitions
//! - **Builder**: two-pass validation and table construction
//! - **Dispatch**: `step` follows a declared transition (or lets its handler
//!   decide), `enter` forces one
//! - **Logger**: optional callback told about every forced transition
//!
//! # Example
//!
//! ```rust
//! use fc_fsm::builder::build;
//! use fc_fsm::core::descriptor::{event, next, next_with, state};
//! use fc_fsm::core::{EventId, StateId};
//! use fc_fsm::dispatch::Dispatch;
//!
//! const IDLE: StateId = StateId::new(1);
//! const ACTIVE: StateId = StateId::new(2);
//! const START: EventId = EventId::new(1);
//! const RESET: EventId = EventId::new(2);
//!
//! struct Exchange {
//!     resets: u32,
//! }
//!
//! let descriptors = vec![
//!     event(START, "start"),
//!     event(RESET, "reset"),
//!     state(IDLE, "idle"),
//!     next(START, ACTIVE),
//!     state(ACTIVE, "active"),
//!     next_with(RESET, IDLE, |table, current, event, exchange: &mut Exchange| {
//!         exchange.resets += 1;
//!         if exchange.resets < 3 {
//!             table.enter(current, IDLE, event, exchange);
//!         }
//!     }),
//! ];
//! let table = build("exchange", &descriptors).unwrap();
//!
//! let mut exchange = Exchange { resets: 0 };
//! let mut current = IDLE;
//! assert_eq!(table.step(&mut current, START, &mut exchange), Dispatch::Entered(ACTIVE));
//! assert_eq!(table.step(&mut current, RESET, &mut exchange), Dispatch::Handled);
//! assert_eq!(current, IDLE);
//! assert_eq!(table.state_name(current), "idle");
//! ```

pub mod builder;
pub mod core;
pub mod dispatch;

// Re-export commonly used types
pub use crate::builder::{build, BuildError, BuildOptions, DescriptorError, TableBuilder};
pub use crate::core::{DescriptorEntry, EventId, Handler, Logger, StateId};
pub use crate::dispatch::{Dispatch, TransitionTable};
