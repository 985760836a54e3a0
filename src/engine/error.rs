//! Errors returned by trigger calls.

use crate::core::{EventCode, StatusCode};
use std::fmt;
use thiserror::Error;

/// Error type hooks return. Anything that is an error can be boxed into it.
pub type HookError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Point in a hop at which a hook runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HookStage {
    /// Exit hooks of the origin status
    Exit,
    /// Before hooks of the transition
    Before,
    /// Enter hooks of the destination status
    Enter,
    /// After hooks of the transition
    After,
}

impl HookStage {
    /// Whether a failure at this stage happens after the status was written.
    pub fn rolls_back(self) -> bool {
        matches!(self, HookStage::Enter | HookStage::After)
    }
}

impl fmt::Display for HookStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HookStage::Exit => "exit",
            HookStage::Before => "before",
            HookStage::Enter => "enter",
            HookStage::After => "after",
        };
        f.write_str(name)
    }
}

/// Errors that can occur while triggering an event.
///
/// The first three variants are graph mismatches: the machine has no unique
/// answer for the event at the entity's current status. They are never
/// resolved automatically.
#[derive(Debug, Error)]
pub enum TriggerError {
    #[error("failed to [{event}] from state [{state}]: no such event")]
    NoSuchEvent { event: EventCode, state: String },

    #[error("failed to [{event}] from state [{state}]: ambiguous transitions")]
    AmbiguousTransitions { event: EventCode, state: String },

    #[error("failed to [{event}] from state [{state}]: no matched transition")]
    NoMatchedTransition { event: EventCode, state: String },

    #[error("illegal state code: {0}")]
    IllegalStateCode(StatusCode),

    /// A hook failed. Displays as the hook's own error.
    #[error("{source}")]
    Hook {
        stage: HookStage,
        #[source]
        source: HookError,
    },
}

impl TriggerError {
    /// Whether the error comes from the machine's graph rather than a hook.
    pub fn is_graph_mismatch(&self) -> bool {
        matches!(
            self,
            TriggerError::NoSuchEvent { .. }
                | TriggerError::AmbiguousTransitions { .. }
                | TriggerError::NoMatchedTransition { .. }
        )
    }

    /// Stage of the failing hook, if a hook failed.
    pub fn hook_stage(&self) -> Option<HookStage> {
        match self {
            TriggerError::Hook { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}
