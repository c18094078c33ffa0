//! assetkeeper - keeps asset status in sync with assignment lifecycles
//!
//! Command-line front end over the REST backend: create and close
//! assignments, run bulk operations, and repair status drift.

// Deny all clippy warnings in this crate
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cargo_common_metadata
)]

mod cli;
mod commands;

/// Main entry point for the assetkeeper CLI
#[tokio::main]
async fn main() -> std::process::ExitCode {
    cli::run().await
}
