pub mod clock;
pub mod conversation;
pub mod error;
pub mod invocation;
pub mod session;
pub mod validator;

// Re-export common error type
pub use error::{PorticoError, ValidationError};
