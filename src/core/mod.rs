//! Core domain logic for assetkeeper
//!
//! Models and the lifecycle rules are pure. Everything that talks to the
//! backend goes through the port traits, so services can be driven by
//! in-memory fakes in tests and by the HTTP adapters in production.
//!
//! ## Architecture
//!
//! - `models/` - Domain types (Asset, Assignment, `BulkOperation`, Warning)
//! - `services/` - Lifecycle synchronizer, bulk executor, reconciler
//! - `ports/` - Trait definitions for the backend collaborators
//! - `error` - The error taxonomy shared by ports and services

pub mod error;
pub mod models;
pub mod ports;
pub mod services;

pub use error::{Error, ErrorKind, Result};
