//! Shared server plumbing: API state and system endpoints.

mod health;
mod router;
mod state;

pub use router::system_router;
pub use state::{ApiState, ApiStateBuilder, ApiStateError};
