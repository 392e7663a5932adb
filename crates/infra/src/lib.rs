//! Infrastructure layer: configuration, the external backend, email.

pub mod backend;
pub mod config;
pub mod email;
pub mod queries;

#[cfg(test)]
mod test_server;

pub use backend::{connect_backend, Backend, BackendError, Direction, InMemoryBackend, Query, RestBackend};
pub use config::{BackendConfig, ConfigError, EmailConfig, ServerConfig, require_env, require_vars};
pub use email::{EmailMessage, EmailSender, HttpEmailSender, SendOutcome, send_test_email, test_message};
