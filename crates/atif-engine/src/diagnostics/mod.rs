// Diagnostics module - trajectory invariant checking
// Pure business logic, used by tests and the `validate` command

pub mod validator;

pub use validator::{TrajectoryIssue, validate_trajectory};
