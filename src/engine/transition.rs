//! Frozen registry entries: states, events and their transitions.

use crate::core::{EventCode, Origin, StatusCode};
use crate::engine::error::{HookError, HookStage, TriggerError};
use std::sync::Arc;

/// Fallible callback run with the entity undergoing a transition.
pub type Hook<M> = Arc<dyn Fn(&mut M) -> Result<(), HookError> + Send + Sync>;

/// Run hooks in order, stopping at the first failure.
pub(crate) fn run_hooks<M>(
    hooks: &[Hook<M>],
    stage: HookStage,
    model: &mut M,
) -> Result<(), TriggerError> {
    for hook in hooks {
        tracing::trace!(%stage, "running hook");
        hook(model).map_err(|source| TriggerError::Hook { stage, source })?;
    }
    Ok(())
}

/// Enter and exit hooks registered for one status.
pub struct StateDef<M> {
    pub(crate) code: StatusCode,
    pub(crate) enters: Vec<Hook<M>>,
    pub(crate) exits: Vec<Hook<M>>,
}

impl<M> StateDef<M> {
    pub(crate) fn new(code: StatusCode) -> Self {
        Self {
            code,
            enters: Vec::new(),
            exits: Vec::new(),
        }
    }

    pub fn code(&self) -> StatusCode {
        self.code
    }

    pub fn enter_count(&self) -> usize {
        self.enters.len()
    }

    pub fn exit_count(&self) -> usize {
        self.exits.len()
    }
}

/// Directed, guarded edge to a destination status.
pub struct TransitionDef<M> {
    pub(crate) to: StatusCode,
    pub(crate) from: Origin,
    pub(crate) befores: Vec<Hook<M>>,
    pub(crate) afters: Vec<Hook<M>>,
    pub(crate) continuable: bool,
}

impl<M> TransitionDef<M> {
    pub(crate) fn new(to: StatusCode) -> Self {
        Self {
            to,
            from: Origin::Any,
            befores: Vec::new(),
            afters: Vec::new(),
            continuable: false,
        }
    }

    pub fn to(&self) -> StatusCode {
        self.to
    }

    pub fn origin(&self) -> &Origin {
        &self.from
    }

    pub fn is_continuable(&self) -> bool {
        self.continuable
    }

    pub fn before_count(&self) -> usize {
        self.befores.len()
    }

    pub fn after_count(&self) -> usize {
        self.afters.len()
    }

    /// Check whether this transition may start at `status` (pure).
    pub fn can_execute(&self, status: StatusCode) -> bool {
        self.from.admits(status)
    }
}

/// Named, ordered set of candidate transitions.
pub struct EventDef<M> {
    pub(crate) code: EventCode,
    pub(crate) transitions: Vec<TransitionDef<M>>,
}

impl<M> EventDef<M> {
    pub(crate) fn new(code: EventCode) -> Self {
        Self {
            code,
            transitions: Vec::new(),
        }
    }

    pub fn code(&self) -> &EventCode {
        &self.code
    }

    pub fn transitions(&self) -> &[TransitionDef<M>] {
        &self.transitions
    }

    /// Transitions whose origin guard admits `status`, in registration order.
    pub fn candidates(&self, status: StatusCode) -> impl Iterator<Item = &TransitionDef<M>> + '_ {
        self.transitions
            .iter()
            .filter(move |transition| transition.can_execute(status))
    }
}
