//! Port traits (interfaces) for the backend collaborators
//!
//! The REST backend owns every asset and assignment. These traits are the
//! only way the services reach it; implementations live in `adapters`.
//!
//! ## Design Principle
//!
//! Services hold `Arc<dyn …>` handles to these traits and never cache what
//! they read. This enables:
//!
//! - **Testability**: In-memory fakes for unit tests
//! - **Flexibility**: Swap the HTTP client without touching lifecycle rules
//! - **Clarity**: Every backend call is visible at the trait boundary

mod asset_api;
mod assignment_api;
mod batch_api;

pub use asset_api::AssetApi;
pub use assignment_api::AssignmentApi;
pub use batch_api::BatchApi;
