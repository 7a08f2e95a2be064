//! System-level modules
//!
//! Process-level functionality that sits outside the HTTP request path,
//! currently just logging initialization.

pub mod logging;

pub use logging::init_logging;
