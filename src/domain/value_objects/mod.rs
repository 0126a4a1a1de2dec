//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod ignored_names;
mod instance_id;
mod selection_state;

pub use ignored_names::{IgnoredNames, DEFAULT_IGNORED_NAMES};
pub use instance_id::InstanceId;
pub use selection_state::SelectionState;
