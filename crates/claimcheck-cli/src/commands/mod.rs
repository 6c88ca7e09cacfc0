//! Command implementations.

pub mod config;
pub mod verify;

pub use self::config::execute_config;
pub use self::verify::{execute_verify, verify};
