//! Core value types shared by the builder and the engine.
//!
//! This module contains the leaf pieces of a machine:
//! - Status and event identifiers, and the `Stateful` capability
//! - Origin guards for transitions
//! - The audit trail handed to audit collaborators
//!
//! Nothing in here knows about hooks or registries.

mod guard;
mod history;
mod state;

pub use guard::Origin;
pub use history::{AuditEntry, AuditLog, AuditSink};
pub use state::{EventCode, Stateful, Status, StatusCode};
