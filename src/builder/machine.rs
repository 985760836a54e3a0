//! Builder for constructing state machines.

use crate::builder::error::{BuildError, InvalidMachine};
use crate::builder::transition::{EventBuilder, StateBuilder};
use crate::core::{AuditSink, EventCode, Origin, StatusCode};
use crate::engine::{EventDef, StateDef, StateMachine};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

type Check = Validation<(), NonEmptyVec<BuildError>>;

fn check(ok: bool, error: impl FnOnce() -> BuildError) -> Check {
    if ok {
        Validation::success(())
    } else {
        Validation::fail(error())
    }
}

/// Registration phase of a state machine.
///
/// States and events are registered here, then [`build`](Self::build)
/// freezes them into a [`StateMachine`]. Only the built machine can trigger
/// events, so registration always happens before use.
///
/// Registering a status or event code twice replaces the earlier definition.
///
/// # Example
///
/// ```rust
/// use hookfsm::builder::StateMachineBuilder;
/// use hookfsm::core::{Stateful, Status, StatusCode};
///
/// const A: StatusCode = StatusCode::new(1);
/// const B: StatusCode = StatusCode::new(2);
/// const C: StatusCode = StatusCode::new(3);
///
/// let mut builder = StateMachineBuilder::<Status>::new().initial(A);
/// builder.states([A, B, C]);
/// {
///     let mut advance = builder.event("advance");
///     advance.to(B).continuable();
///     advance.to(C).from([B]).continuable();
/// }
/// let machine = builder.build().unwrap();
///
/// let mut chained = Status::default();
/// machine.trigger_chained("advance", &mut chained, &[]).unwrap();
/// assert_eq!(chained.status(), C);
///
/// let mut single = Status::default();
/// machine.trigger("advance", &mut single, &[]).unwrap();
/// assert_eq!(single.status(), B);
/// ```
pub struct StateMachineBuilder<M> {
    initial: Option<StatusCode>,
    states: HashMap<StatusCode, StateDef<M>>,
    events: HashMap<EventCode, EventDef<M>>,
    audit: Option<Arc<dyn AuditSink>>,
}

impl<M> StateMachineBuilder<M> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            initial: None,
            states: HashMap::new(),
            events: HashMap::new(),
            audit: None,
        }
    }

    /// Set the initial status (required).
    pub fn initial(mut self, code: impl Into<StatusCode>) -> Self {
        self.initial = Some(code.into());
        self
    }

    /// Forward every successful hop, with the trigger's notes, to `sink`.
    pub fn audit(mut self, sink: Arc<dyn AuditSink>) -> Self {
        self.audit = Some(sink);
        self
    }

    /// Register (or replace) a status and return a handle for its hooks.
    pub fn state(&mut self, code: impl Into<StatusCode>) -> StateBuilder<'_, M> {
        let code = code.into();
        let def = match self.states.entry(code) {
            Entry::Occupied(mut entry) => {
                tracing::debug!(status = %code, "replacing state definition");
                entry.insert(StateDef::new(code));
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(StateDef::new(code)),
        };
        StateBuilder::new(def)
    }

    /// Register (or replace) several statuses without hooks.
    pub fn states<I>(&mut self, codes: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<StatusCode>,
    {
        for code in codes {
            self.state(code);
        }
        self
    }

    /// Register (or replace) an event and return a handle for its transitions.
    pub fn event(&mut self, code: impl Into<EventCode>) -> EventBuilder<'_, M> {
        let code = code.into();
        let def = match self.events.entry(code.clone()) {
            Entry::Occupied(mut entry) => {
                tracing::debug!(event = %code, "replacing event definition");
                entry.insert(EventDef::new(code));
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(EventDef::new(code)),
        };
        EventBuilder::new(def)
    }

    fn validate(&self) -> Check {
        let mut checks: Vec<Check> = Vec::new();

        match self.initial {
            None => checks.push(Validation::fail(BuildError::MissingInitialState)),
            Some(initial) => checks.push(check(!initial.is_nil(), || BuildError::NilInitialState)),
        }

        checks.push(check(!self.states.contains_key(&StatusCode::NIL), || {
            BuildError::NilState
        }));

        let mut events: Vec<&EventDef<M>> = self.events.values().collect();
        events.sort_by(|a, b| a.code.cmp(&b.code));
        for event in events {
            for transition in &event.transitions {
                checks.push(check(!transition.to.is_nil(), || BuildError::NilDestination {
                    event: event.code.clone(),
                }));
                if let Origin::Only(codes) = &transition.from {
                    checks.push(check(!codes.is_empty(), || BuildError::EmptyOrigin {
                        event: event.code.clone(),
                        to: transition.to,
                    }));
                    checks.push(check(!codes.contains(&StatusCode::NIL), || {
                        BuildError::NilOrigin {
                            event: event.code.clone(),
                        }
                    }));
                }
            }
        }

        Validation::all_vec(checks).map(|_| ())
    }

    /// Freeze the registration into a [`StateMachine`].
    ///
    /// Every problem is reported at once rather than stopping at the first.
    pub fn build(self) -> Result<StateMachine<M>, InvalidMachine> {
        if let Validation::Failure(errors) = self.validate() {
            return Err(InvalidMachine {
                errors: errors.iter().cloned().collect(),
            });
        }

        for event in self.events.values() {
            if event.transitions.is_empty() {
                tracing::warn!(event = %event.code, "event has no transitions");
            }
        }

        let Some(initial) = self.initial else {
            return Err(InvalidMachine {
                errors: vec![BuildError::MissingInitialState],
            });
        };

        tracing::debug!(
            initial = %initial,
            states = self.states.len(),
            events = self.events.len(),
            "state machine built"
        );
        Ok(StateMachine::from_parts(
            initial,
            self.states,
            self.events,
            self.audit,
        ))
    }
}

impl<M> Default for StateMachineBuilder<M> {
    fn default() -> Self {
        Self::new()
    }
}
