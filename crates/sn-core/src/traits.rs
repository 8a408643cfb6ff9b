//! # Core Traits (Ports)
//!
//! Seams between the registry and the things it should not hard-wire:
//! the time source and the graph view used by suggestion engines.

use chrono::{DateTime, Utc};

use crate::models::UserId;

/// Time source used to stamp new posts.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Read-only view of directed follow edges.
pub trait FollowGraph {
    /// Users followed by `user`, in the order they were followed.
    /// Unknown users have no edges.
    fn following_of(&self, user: UserId) -> &[UserId];
}

/// Derives friend candidates for a user from a follow graph.
pub trait SuggestionEngine: Send + Sync {
    fn suggest(&self, graph: &dyn FollowGraph, user: UserId) -> Vec<UserId>;
}
