//! Logger setup.

mod init;

pub use init::{init, init_from_env, LogConfig};
