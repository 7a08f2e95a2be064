//! HTTP API layer
//!
//! actix-web handlers that validate input, call the service layer, and shape
//! the JSON responses consumed by the host shell.

pub mod error_code;
pub mod helpers;
pub mod routes;
pub mod types;

mod export_import;
mod history;
mod preferences;
mod system;
mod templates;

pub use error_code::ErrorCode;
pub use system::AppStartTime;
