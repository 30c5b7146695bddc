//! Builder for transition tables.

use crate::builder::error::BuildError;
use crate::builder::options::{BuildOptions, DuplicatePolicy, IndexWidth};
use crate::builder::validator::{validate, Limits};
use crate::core::{DescriptorEntry, Logger, StateId, NONE_NAME};
use crate::dispatch::{IndexBuffer, StateRecord, TransitionTable};
use stillwater::validation::Validation;

/// Builder for constructing transition tables with a fluent API.
pub struct TableBuilder<C> {
    name: String,
    options: BuildOptions,
    logger: Option<Logger<C>>,
}

impl<C> TableBuilder<C> {
    /// Create a new builder for the table called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: BuildOptions::default(),
            logger: None,
        }
    }

    /// Replace all options at once.
    pub fn options(mut self, options: BuildOptions) -> Self {
        self.options = options;
        self
    }

    pub fn index_width(mut self, width: IndexWidth) -> Self {
        self.options.index_width = width;
        self
    }

    pub fn duplicates(mut self, policy: DuplicatePolicy) -> Self {
        self.options.duplicates = policy;
        self
    }

    /// Install a logger on the built table.
    pub fn logger(mut self, logger: Logger<C>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Validate `descriptors` and build the dense table from them.
    ///
    /// Either every descriptor is valid and a fully usable table is
    /// returned, or the build fails with the complete list of problems.
    pub fn build<'d>(
        self,
        descriptors: &'d [DescriptorEntry<C>],
    ) -> Result<TransitionTable<'d, C>, BuildError> {
        match validate(descriptors, &self.options) {
            Validation::Success(limits) => {
                let table = populate(
                    self.name,
                    descriptors,
                    limits,
                    self.options.index_width,
                    self.logger,
                );
                tracing::debug!(
                    table = %table.name(),
                    states = limits.state_limit,
                    events = limits.event_limit,
                    descriptors = limits.descriptor_count,
                    "built transition table"
                );
                Ok(table)
            }
            Validation::Failure(errors) => {
                let errors: Vec<_> = errors.iter().cloned().collect();
                tracing::warn!(
                    table = %self.name,
                    errors = errors.len(),
                    "rejected transition description"
                );
                Err(BuildError::InvalidDescriptors {
                    table: self.name,
                    errors,
                })
            }
        }
    }
}

/// Second pass: fill the three containers from validated descriptors.
fn populate<'d, C>(
    name: String,
    descriptors: &'d [DescriptorEntry<C>],
    limits: Limits,
    width: IndexWidth,
    logger: Option<Logger<C>>,
) -> TransitionTable<'d, C> {
    let Some(cell_count) = limits.cells() else {
        unreachable!("table '{name}': cell count overflowed after validation");
    };
    let mut cells = IndexBuffer::new(width, cell_count);
    let mut states: Vec<StateRecord<'d, C>> =
        (0..limits.state_limit).map(|_| StateRecord::default()).collect();
    let mut events: Vec<&'d str> = vec![""; limits.event_limit];
    let mut current = StateId::NONE;

    for (position, entry) in descriptors[..limits.descriptor_count].iter().enumerate() {
        match entry {
            DescriptorEntry::End => break,
            DescriptorEntry::StateLabel { state, name } => {
                states[state.index()].name = name.as_ref();
                current = *state;
            }
            DescriptorEntry::Handler { state, handler } => {
                states[state.index()].handler = Some(handler);
                current = *state;
            }
            DescriptorEntry::EventLabel { event, name } => {
                events[event.index()] = name.as_ref();
            }
            DescriptorEntry::From { state } => current = *state,
            DescriptorEntry::Next { event, .. } => {
                // Later entries overwrite earlier ones; the validator has
                // already rejected duplicates unless they are allowed.
                cells.set(current.index() * limits.event_limit + event.index(), position);
            }
        }
    }

    states[0].name = NONE_NAME;
    events[0] = NONE_NAME;

    if let Some(number) = states.iter().position(|record| record.name.is_empty()) {
        unreachable!("table '{name}': state {number} left unnamed after validation");
    }
    if let Some(number) = events.iter().position(|event| event.is_empty()) {
        unreachable!("table '{name}': event {number} left unnamed after validation");
    }

    TransitionTable::from_parts(name, descriptors, limits, cells, states, events, logger)
}
