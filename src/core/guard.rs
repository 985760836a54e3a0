//! Origin guards for transitions.
//!
//! A transition is only a candidate when the entity's current status passes
//! its origin guard. The wildcard is an explicit variant so that an empty set
//! of origins can never silently mean "anything".

use super::state::StatusCode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Set of statuses a transition may start from.
///
/// # Example
///
/// ```rust
/// use hookfsm::core::{Origin, StatusCode};
///
/// let draft = StatusCode::new(1);
/// let review = StatusCode::new(2);
/// let published = StatusCode::new(3);
///
/// let guard = Origin::only([draft, review]);
/// assert!(guard.admits(draft));
/// assert!(!guard.admits(published));
///
/// assert!(Origin::Any.admits(published));
/// ```
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    /// Matches every current status.
    #[default]
    Any,
    /// Matches only the listed statuses.
    Only(BTreeSet<StatusCode>),
}

impl Origin {
    pub fn only<I>(codes: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<StatusCode>,
    {
        Origin::Only(codes.into_iter().map(Into::into).collect())
    }

    /// Check whether a transition guarded by this origin may start at `status`.
    pub fn admits(&self, status: StatusCode) -> bool {
        match self {
            Origin::Any => true,
            Origin::Only(codes) => codes.contains(&status),
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, Origin::Any)
    }
}
