//! Execution engine: frozen registries and the trigger algorithm.
//!
//! A [`StateMachine`] is produced once by the builder and never mutated
//! afterwards. Each trigger call reads the entity's status, resolves exactly
//! one transition of the event, writes the new status and runs the hooks
//! around it.
//!
//! # Hop protocol
//!
//! 1. exit hooks of the origin status
//! 2. before hooks of the transition
//! 3. status write
//! 4. enter hooks of the destination status
//! 5. after hooks of the transition
//!
//! The first failing hook aborts the call. Failures in steps 4 and 5 restore
//! the origin status; side effects of hooks that already ran are not undone.

mod error;
mod machine;
mod transition;

pub use error::{HookError, HookStage, TriggerError};
pub use machine::StateMachine;
pub use transition::{EventDef, Hook, StateDef, TransitionDef};
