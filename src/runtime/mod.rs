//! Runtime orchestration
//!
//! Server startup, HTTP serving and graceful shutdown.

pub mod server;
pub mod shutdown;
pub mod startup;

pub use server::run_server;
