//! Hookfsm: a finite-state-machine engine driven by hooks
//!
//! Hookfsm drives the status field of domain entities through registered
//! transitions. The machine never owns an entity: it reads and writes the
//! entity's status through the [`Stateful`](crate::core::Stateful) capability for the
//! duration of one trigger call, and runs fallible hooks around each hop.
//!
//! # Core Concepts
//!
//! - **Status / Event codes**: opaque identifiers; status `0` is reserved as
//!   the "not initialized yet" sentinel
//! - **States**: enter and exit hooks attached to a status
//! - **Events**: named sets of guarded transitions, exactly one of which must
//!   match the current status
//! - **Transitions**: destination, origin guard, before/after hooks and a
//!   continuable flag for chained triggers
//!
//! # Example
//!
//! ```rust
//! use hookfsm::builder::StateMachineBuilder;
//! use hookfsm::core::{Stateful, Status, StatusCode};
//! use std::sync::{Arc, Mutex};
//!
//! const A: StatusCode = StatusCode::new(1);
//! const B: StatusCode = StatusCode::new(2);
//!
//! let trace = Arc::new(Mutex::new(Vec::new()));
//! let (exit, enter) = (trace.clone(), trace.clone());
//!
//! let mut builder = StateMachineBuilder::<Status>::new().initial(A);
//! builder.state(A).exit(move |_| {
//!     exit.lock().unwrap().push("exitA");
//!     Ok(())
//! });
//! builder.state(B).enter(move |_| {
//!     enter.lock().unwrap().push("enterB");
//!     Ok(())
//! });
//! builder.event("go").to(B).from([A]);
//! let machine = builder.build().unwrap();
//!
//! let mut entity = Status::default();
//! machine.trigger("go", &mut entity, &[]).unwrap();
//!
//! assert_eq!(entity.status(), B);
//! assert_eq!(*trace.lock().unwrap(), vec!["exitA", "enterB"]);
//! ```

pub mod builder;
pub mod core;
pub mod describe;
pub mod engine;

// Re-export commonly used types
pub use builder::{BuildError, InvalidMachine, StateMachineBuilder};
pub use self::core::{AuditEntry, AuditLog, AuditSink, EventCode, Origin, Stateful, Status, StatusCode};
pub use describe::MachineDescription;
pub use engine::{HookError, HookStage, StateMachine, TriggerError};
