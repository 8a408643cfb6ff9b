//! social-network/crates/sn-core/src/lib.rs
//!
//! The central domain logic and interface definitions for the social network:
//! account registry, follow graph, per-user feeds and friend suggestions.

pub mod error;
pub mod models;
pub mod registry;
pub mod seed;
pub mod suggestions;
pub mod traits;

// Re-exporting for easier access in other crates
pub use error::*;
pub use models::*;
pub use registry::Registry;
pub use seed::{SeedData, SeedReport};
pub use suggestions::SecondDegree;
pub use traits::*;
