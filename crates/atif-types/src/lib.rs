pub mod context;
pub mod error;
pub mod event;
pub mod trajectory;

pub use context::{AgentContext, RunContext};
pub use error::{Error, Result};
pub use event::*;
pub use trajectory::*;
