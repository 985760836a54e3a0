//! Build errors for state machine builders.

use crate::core::{EventCode, StatusCode};
use thiserror::Error;

/// Problems `StateMachineBuilder::build` detects in a registration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(status) before .build()")]
    MissingInitialState,

    #[error("Initial state is the reserved nil status")]
    NilInitialState,

    #[error("State registered under the reserved nil status")]
    NilState,

    #[error("Event [{event}] has a transition to the reserved nil status")]
    NilDestination { event: EventCode },

    #[error("Event [{event}] has a transition from the reserved nil status")]
    NilOrigin { event: EventCode },

    #[error("Event [{event}] has a transition to [{to}] with an empty origin set")]
    EmptyOrigin { event: EventCode, to: StatusCode },
}

/// Every problem found while building a machine.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid state machine: {}", render(.errors))]
pub struct InvalidMachine {
    pub errors: Vec<BuildError>,
}

fn render(errors: &[BuildError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl InvalidMachine {
    pub fn contains(&self, error: &BuildError) -> bool {
        self.errors.contains(error)
    }
}
