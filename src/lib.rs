//! UTMka - UTM link builder backend
//!
//! This library provides the core functionality for the UTMka service:
//! building tagged campaign URLs, keeping a per-user history of generated
//! links and reusable tag templates, JSON/CSV export and import, and local
//! UI preferences.
//!
//! # Architecture
//! - `utm`: URL normalization and UTM parameter handling
//! - `storage`: SeaORM storage backend and data access
//! - `services`: Business logic for history records and templates
//! - `export`: JSON/CSV codec for history and template transfer
//! - `preferences`: File-backed UI preferences
//! - `api`: HTTP handlers and routes
//! - `config`: Configuration management
//! - `runtime`: Application lifecycle
//! - `system`: Logging initialization

pub mod api;
pub mod config;
pub mod errors;
pub mod export;
pub mod preferences;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utm;
