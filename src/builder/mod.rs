//! Builder API for registering statuses, events and transitions.
//!
//! Registration is fluent: `state` and `event` return handles that hooks and
//! transitions are attached to, and `build` freezes everything into an
//! immutable [`StateMachine`](crate::engine::StateMachine).

pub mod error;
pub mod machine;
pub mod macros;
pub mod transition;

pub use error::{BuildError, InvalidMachine};
pub use machine::StateMachineBuilder;
pub use transition::{EventBuilder, StateBuilder, TransitionBuilder};

use crate::engine::HookError;

/// Adapt an infallible callback into a hook.
///
/// # Example
///
/// ```
/// use hookfsm::builder::{infallible, StateMachineBuilder};
/// use hookfsm::core::{Status, StatusCode};
///
/// let mut builder = StateMachineBuilder::<Status>::new().initial(StatusCode::new(1));
/// builder
///     .state(StatusCode::new(2))
///     .enter(infallible(|status: &mut Status| println!("entered {:?}", status)));
/// ```
pub fn infallible<M, F>(f: F) -> impl Fn(&mut M) -> Result<(), HookError> + Send + Sync + 'static
where
    M: 'static,
    F: Fn(&mut M) + Send + Sync + 'static,
{
    move |model: &mut M| -> Result<(), HookError> {
        f(model);
        Ok(())
    }
}
