//! Registration handles returned by [`StateMachineBuilder`].
//!
//! Each handle borrows the entry it was created for, so hooks and
//! transitions can be attached fluently right after the entry is declared.
//!
//! [`StateMachineBuilder`]: crate::builder::StateMachineBuilder

use crate::core::{Origin, StatusCode};
use crate::engine::{EventDef, HookError, StateDef, TransitionDef};
use std::sync::Arc;

/// Handle for attaching enter/exit hooks to a status.
pub struct StateBuilder<'a, M> {
    def: &'a mut StateDef<M>,
}

impl<'a, M> StateBuilder<'a, M> {
    pub(crate) fn new(def: &'a mut StateDef<M>) -> Self {
        Self { def }
    }

    /// Run `hook` every time an entity enters this status.
    pub fn enter<F>(self, hook: F) -> Self
    where
        F: Fn(&mut M) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.def.enters.push(Arc::new(hook));
        self
    }

    /// Run `hook` every time an entity leaves this status.
    pub fn exit<F>(self, hook: F) -> Self
    where
        F: Fn(&mut M) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.def.exits.push(Arc::new(hook));
        self
    }

    pub fn code(&self) -> StatusCode {
        self.def.code
    }
}

/// Handle for adding transitions to an event.
pub struct EventBuilder<'a, M> {
    def: &'a mut EventDef<M>,
}

impl<'a, M> EventBuilder<'a, M> {
    pub(crate) fn new(def: &'a mut EventDef<M>) -> Self {
        Self { def }
    }

    /// Add a transition to `code`. It starts from any status and is not
    /// continuable until configured otherwise.
    pub fn to(&mut self, code: impl Into<StatusCode>) -> TransitionBuilder<'_, M> {
        self.def.transitions.push(TransitionDef::new(code.into()));
        let index = self.def.transitions.len() - 1;
        TransitionBuilder {
            def: &mut self.def.transitions[index],
        }
    }

    pub fn transition_count(&self) -> usize {
        self.def.transitions.len()
    }
}

/// Handle for configuring one transition.
pub struct TransitionBuilder<'a, M> {
    def: &'a mut TransitionDef<M>,
}

impl<'a, M> TransitionBuilder<'a, M> {
    /// Restrict the transition to the listed origin statuses.
    ///
    /// Calling it again replaces the previous set. An empty set is rejected
    /// when the machine is built.
    pub fn from<I>(self, codes: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<StatusCode>,
    {
        self.def.from = Origin::only(codes);
        self
    }

    /// Accept any origin status (the default).
    pub fn from_any(self) -> Self {
        self.def.from = Origin::Any;
        self
    }

    /// Set the origin guard directly.
    pub fn origin(self, origin: Origin) -> Self {
        self.def.from = origin;
        self
    }

    /// Run `hook` before the status is written.
    pub fn before<F>(self, hook: F) -> Self
    where
        F: Fn(&mut M) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.def.befores.push(Arc::new(hook));
        self
    }

    /// Run `hook` after the destination's enter hooks.
    pub fn after<F>(self, hook: F) -> Self
    where
        F: Fn(&mut M) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.def.afters.push(Arc::new(hook));
        self
    }

    /// Let chained triggers re-evaluate the event after taking this transition.
    pub fn continuable(self) -> Self {
        self.def.continuable = true;
        self
    }
}
