//! Adapter implementations for port traits
//!
//! This module contains concrete implementations that handle I/O:
//!
//! - `http/` - REST backend client implementing `AssetApi`, `AssignmentApi`
//!   and `BatchApi`

pub mod http;

pub use http::HttpBackend;
