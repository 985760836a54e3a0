//! Status and event identifiers plus the `Stateful` capability.
//!
//! A machine never owns the entities it drives. It reads and writes a single
//! status field through the `Stateful` trait for the duration of one trigger
//! call and nothing else.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Opaque identifier of a machine status.
///
/// `StatusCode::NIL` is reserved: it marks an entity whose status has never
/// been set, and is replaced by the machine's initial status on first use.
///
/// # Example
///
/// ```rust
/// use hookfsm::core::StatusCode;
///
/// let draft = StatusCode::new(1);
/// assert!(!draft.is_nil());
/// assert!(StatusCode::default().is_nil());
/// assert_eq!(draft.to_string(), "1");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusCode(i32);

impl StatusCode {
    /// The uninitialized sentinel.
    pub const NIL: StatusCode = StatusCode(0);

    pub const fn new(code: i32) -> Self {
        StatusCode(code)
    }

    pub const fn get(self) -> i32 {
        self.0
    }

    pub const fn is_nil(self) -> bool {
        self.0 == Self::NIL.0
    }
}

impl From<i32> for StatusCode {
    fn from(code: i32) -> Self {
        StatusCode(code)
    }
}

impl From<StatusCode> for i32 {
    fn from(code: StatusCode) -> Self {
        code.0
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque identifier of a triggerable event.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventCode(String);

impl EventCode {
    pub fn new(code: impl Into<String>) -> Self {
        EventCode(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EventCode {
    fn from(code: &str) -> Self {
        EventCode(code.to_string())
    }
}

impl From<String> for EventCode {
    fn from(code: String) -> Self {
        EventCode(code)
    }
}

impl From<&EventCode> for EventCode {
    fn from(code: &EventCode) -> Self {
        code.clone()
    }
}

impl AsRef<str> for EventCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for EventCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Capability a domain entity provides so a machine can drive its status.
///
/// Any type may implement it; there is no common base type. The display name
/// is only used in diagnostics and defaults to the numeric code.
///
/// # Example
///
/// ```rust
/// use hookfsm::core::{Stateful, StatusCode};
///
/// struct Ticket {
///     status: StatusCode,
/// }
///
/// impl Stateful for Ticket {
///     fn status(&self) -> StatusCode {
///         self.status
///     }
///
///     fn set_status(&mut self, code: StatusCode) {
///         self.status = code;
///     }
/// }
///
/// let mut ticket = Ticket { status: StatusCode::NIL };
/// ticket.set_status(StatusCode::new(2));
/// assert_eq!(ticket.status_name(), "2");
/// ```
pub trait Stateful {
    /// Current status of the entity.
    fn status(&self) -> StatusCode;

    /// Overwrite the status of the entity.
    fn set_status(&mut self, code: StatusCode);

    /// Render the current status for error messages and logs.
    fn status_name(&self) -> String {
        self.status().to_string()
    }
}

/// Embeddable status field for entities that delegate `Stateful` to it.
///
/// Serializes as `{"state": <code>}`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct Status {
    pub state: StatusCode,
}

impl Status {
    pub fn new(state: StatusCode) -> Self {
        Self { state }
    }
}

impl Stateful for Status {
    fn status(&self) -> StatusCode {
        self.state
    }

    fn set_status(&mut self, code: StatusCode) {
        self.state = code;
    }
}
