//! Built state machine and the trigger algorithm.

use crate::core::{AuditEntry, AuditSink, EventCode, Stateful, StatusCode};
use crate::engine::error::{HookStage, TriggerError};
use crate::engine::transition::{run_hooks, EventDef, StateDef, TransitionDef};
use chrono::Utc;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Outcome of matching an event's transitions against a status.
enum Matched<'a, M> {
    Nothing,
    One(&'a TransitionDef<M>),
    Ambiguous,
}

fn unique<'a, M: 'a>(mut candidates: impl Iterator<Item = &'a TransitionDef<M>>) -> Matched<'a, M> {
    match (candidates.next(), candidates.next()) {
        (None, _) => Matched::Nothing,
        (Some(transition), None) => Matched::One(transition),
        (Some(_), Some(_)) => Matched::Ambiguous,
    }
}

/// Immutable state machine produced by
/// [`StateMachineBuilder::build`](crate::builder::StateMachineBuilder::build).
///
/// A built machine only reads its registries, so it can be shared between
/// threads (e.g. behind an `Arc`) and drive any number of entities. Calls on
/// the *same* entity must be serialized by the caller.
pub struct StateMachine<M> {
    initial: StatusCode,
    states: HashMap<StatusCode, StateDef<M>>,
    events: HashMap<EventCode, EventDef<M>>,
    audit: Option<Arc<dyn AuditSink>>,
}

impl<M> StateMachine<M> {
    pub(crate) fn from_parts(
        initial: StatusCode,
        states: HashMap<StatusCode, StateDef<M>>,
        events: HashMap<EventCode, EventDef<M>>,
        audit: Option<Arc<dyn AuditSink>>,
    ) -> Self {
        Self {
            initial,
            states,
            events,
            audit,
        }
    }

    /// Status given to entities that are still at the sentinel.
    pub fn initial(&self) -> StatusCode {
        self.initial
    }

    pub fn state(&self, code: StatusCode) -> Option<&StateDef<M>> {
        self.states.get(&code)
    }

    pub fn event(&self, code: &str) -> Option<&EventDef<M>> {
        self.events.get(code)
    }

    pub fn has_state(&self, code: StatusCode) -> bool {
        self.states.contains_key(&code)
    }

    pub fn has_event(&self, code: &str) -> bool {
        self.events.contains_key(code)
    }

    pub fn states(&self) -> impl Iterator<Item = &StateDef<M>> + '_ {
        self.states.values()
    }

    pub fn events(&self) -> impl Iterator<Item = &EventDef<M>> + '_ {
        self.events.values()
    }

    /// Registered event codes, sorted.
    pub fn event_codes(&self) -> Vec<&EventCode> {
        let mut codes: Vec<_> = self.events.keys().collect();
        codes.sort();
        codes
    }
}

impl<M: Stateful> StateMachine<M> {
    /// Take exactly one hop for `event`.
    ///
    /// An entity still at [`StatusCode::NIL`] is first moved to the initial
    /// status. The hop runs, in order, the origin's exit hooks, the
    /// transition's before hooks, the status write, the destination's enter
    /// hooks and the transition's after hooks. A failing enter or after hook
    /// restores the origin status. `notes` are only forwarded to the audit
    /// sink, if any.
    ///
    /// # Example
    ///
    /// ```rust
    /// use hookfsm::builder::StateMachineBuilder;
    /// use hookfsm::core::{Stateful, Status, StatusCode};
    ///
    /// const OPEN: StatusCode = StatusCode::new(1);
    /// const CLOSED: StatusCode = StatusCode::new(2);
    ///
    /// let mut builder = StateMachineBuilder::<Status>::new().initial(OPEN);
    /// builder.event("close").to(CLOSED).from([OPEN]);
    /// let machine = builder.build().unwrap();
    ///
    /// let mut door = Status::default();
    /// machine.trigger("close", &mut door, &["night shift"]).unwrap();
    /// assert_eq!(door.status(), CLOSED);
    ///
    /// let err = machine.trigger("close", &mut door, &[]).unwrap_err();
    /// assert_eq!(err.to_string(), "failed to [close] from state [2]: no matched transition");
    /// ```
    pub fn trigger(&self, event: &str, model: &mut M, notes: &[&str]) -> Result<(), TriggerError> {
        self.run(event, model, false, notes)
    }

    /// Take one hop for `event`, then keep re-evaluating the same event from
    /// each new status while the transitions taken are continuable.
    ///
    /// Continuation hops never lead back to a status already visited during
    /// this call: such candidates are discarded, and when none remain the
    /// chain ends successfully. A status with no transition for `event` at
    /// all still fails with [`TriggerError::NoMatchedTransition`]. Every hop
    /// that completed stays committed even if a later hop fails.
    pub fn trigger_chained(
        &self,
        event: &str,
        model: &mut M,
        notes: &[&str],
    ) -> Result<(), TriggerError> {
        self.run(event, model, true, notes)
    }

    fn run(
        &self,
        event: &str,
        model: &mut M,
        chained: bool,
        notes: &[&str],
    ) -> Result<(), TriggerError> {
        let _span = tracing::debug_span!("trigger", event, chained).entered();

        if model.status().is_nil() {
            model.set_status(self.initial);
        }

        let Some(def) = self.events.get(event) else {
            return Err(TriggerError::NoSuchEvent {
                event: EventCode::from(event),
                state: model.status_name(),
            });
        };

        // Destinations taken so far plus every origin seen; bounds the chain.
        let mut visited: Vec<StatusCode> = Vec::new();
        loop {
            let origin = model.status();
            let first = visited.is_empty();
            visited.push(origin);

            // A status the event has no transition from is a mismatch even
            // mid-chain; only revisits end the chain quietly.
            let matched = if first || def.candidates(origin).next().is_none() {
                unique(def.candidates(origin))
            } else {
                match unique(
                    def.candidates(origin)
                        .filter(|transition| !visited.contains(&transition.to)),
                ) {
                    Matched::Nothing => {
                        tracing::debug!(status = %origin, "chain ends, no unvisited destination");
                        return Ok(());
                    }
                    other => other,
                }
            };

            let transition = match matched {
                Matched::One(transition) => transition,
                Matched::Nothing => {
                    return Err(TriggerError::NoMatchedTransition {
                        event: def.code.clone(),
                        state: model.status_name(),
                    })
                }
                Matched::Ambiguous => {
                    return Err(TriggerError::AmbiguousTransitions {
                        event: def.code.clone(),
                        state: model.status_name(),
                    })
                }
            };

            self.hop(def, transition, origin, model, notes)?;
            visited.push(transition.to);

            if !(chained && transition.continuable && model.status() != origin) {
                return Ok(());
            }
        }
    }

    fn hop(
        &self,
        event: &EventDef<M>,
        transition: &TransitionDef<M>,
        origin: StatusCode,
        model: &mut M,
        notes: &[&str],
    ) -> Result<(), TriggerError> {
        if let Some(state) = self.states.get(&origin) {
            run_hooks(&state.exits, HookStage::Exit, model)?;
        }
        run_hooks(&transition.befores, HookStage::Before, model)?;

        model.set_status(transition.to);

        let entered = match self.states.get(&transition.to) {
            Some(state) => run_hooks(&state.enters, HookStage::Enter, model),
            None => Ok(()),
        };
        if let Err(err) = entered.and_then(|()| run_hooks(&transition.afters, HookStage::After, model)) {
            tracing::debug!(
                event = %event.code,
                from = %origin,
                to = %transition.to,
                "hook failed, status rolled back"
            );
            model.set_status(origin);
            return Err(err);
        }

        tracing::debug!(
            event = %event.code,
            from = %origin,
            to = %transition.to,
            "transition taken"
        );

        if let Some(sink) = &self.audit {
            sink.record(AuditEntry {
                event: event.code.clone(),
                from: origin,
                to: model.status(),
                notes: notes.iter().map(|note| note.to_string()).collect(),
                at: Utc::now(),
            });
        }
        Ok(())
    }
}

impl<M> fmt::Debug for StateMachine<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut states: Vec<_> = self.states.keys().collect();
        states.sort();
        f.debug_struct("StateMachine")
            .field("initial", &self.initial)
            .field("states", &states)
            .field("events", &self.event_codes())
            .field("audited", &self.audit.is_some())
            .finish()
    }
}
