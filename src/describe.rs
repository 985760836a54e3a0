//! Serializable description of a built machine's graph.
//!
//! Hooks are closures and cannot be serialized, so a description carries
//! their counts only. It is meant for diagnostics and documentation, not for
//! rebuilding a machine.

use crate::core::{EventCode, Origin, StatusCode};
use crate::engine::StateMachine;
use serde::{Deserialize, Serialize};

/// Version of the description format.
pub const DESCRIPTION_VERSION: u32 = 1;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateDescription {
    pub code: StatusCode,
    pub enter_hooks: usize,
    pub exit_hooks: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionDescription {
    pub to: StatusCode,
    pub from: Origin,
    pub before_hooks: usize,
    pub after_hooks: usize,
    pub continuable: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventDescription {
    pub code: EventCode,
    /// Transitions in registration order
    pub transitions: Vec<TransitionDescription>,
}

/// Snapshot of a machine's registries.
///
/// States and events are sorted by code so that two descriptions of the same
/// registration compare equal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MachineDescription {
    pub version: u32,
    pub initial: StatusCode,
    pub states: Vec<StateDescription>,
    pub events: Vec<EventDescription>,
}

impl MachineDescription {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn event(&self, code: &str) -> Option<&EventDescription> {
        self.events.iter().find(|event| event.code.as_str() == code)
    }

    /// Every status mentioned anywhere: initial, registered states,
    /// destinations and explicit origins.
    pub fn statuses(&self) -> Vec<StatusCode> {
        let mut codes = vec![self.initial];
        codes.extend(self.states.iter().map(|state| state.code));
        for event in &self.events {
            for transition in &event.transitions {
                codes.push(transition.to);
                if let Origin::Only(from) = &transition.from {
                    codes.extend(from.iter().copied());
                }
            }
        }
        codes.sort();
        codes.dedup();
        codes
    }
}

impl<M> StateMachine<M> {
    /// Describe the machine's registries.
    ///
    /// # Example
    ///
    /// ```rust
    /// use hookfsm::builder::StateMachineBuilder;
    /// use hookfsm::core::{Status, StatusCode};
    ///
    /// let mut builder = StateMachineBuilder::<Status>::new().initial(StatusCode::new(1));
    /// builder.event("go").to(StatusCode::new(2)).from([StatusCode::new(1)]);
    /// let machine = builder.build().unwrap();
    ///
    /// let description = machine.describe();
    /// assert_eq!(description.events.len(), 1);
    /// assert!(description.to_json().unwrap().contains("\"go\""));
    /// ```
    pub fn describe(&self) -> MachineDescription {
        let mut states: Vec<StateDescription> = self
            .states()
            .map(|state| StateDescription {
                code: state.code(),
                enter_hooks: state.enter_count(),
                exit_hooks: state.exit_count(),
            })
            .collect();
        states.sort_by_key(|state| state.code);

        let mut events: Vec<EventDescription> = self
            .events()
            .map(|event| EventDescription {
                code: event.code().clone(),
                transitions: event
                    .transitions()
                    .iter()
                    .map(|transition| TransitionDescription {
                        to: transition.to(),
                        from: transition.origin().clone(),
                        before_hooks: transition.before_count(),
                        after_hooks: transition.after_count(),
                        continuable: transition.is_continuable(),
                    })
                    .collect(),
            })
            .collect();
        events.sort_by(|a, b| a.code.cmp(&b.code));

        MachineDescription {
            version: DESCRIPTION_VERSION,
            initial: self.initial(),
            states,
            events,
        }
    }
}
