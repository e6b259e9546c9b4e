//! Query domain
//!
//! The single active query and its status state machine.

mod input;
mod session;

pub use input::QueryInput;
pub use session::{QuerySession, QueryStatus, SubmitRejection};
