//! Logger bootstrap.
//!
//! The engine only talks to the `log` facade. Applications call
//! [`init_logging`] once near the top of `main` to install `env_logger`.

mod init;

pub use init::{init_logging, LoggingConfig};
