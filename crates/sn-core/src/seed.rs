//! # Seed Data
//!
//! Bulk-loads accounts, follow edges and posts from JSON. Everything goes
//! through the public `Registry` operations so the usual invariants hold.
//!
//! ```json
//! {
//!   "users":   [{ "name": "Alice", "address": "1 Main St", "email": "a@x.com", "username": "alice" }],
//!   "follows": [{ "follower": "alice", "target": "bob" }],
//!   "posts":   [{ "author": "alice", "content": "hello" }]
//! }
//! ```

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{AppError, Result};
use crate::registry::Registry;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub users: Vec<SeedUser>,
    #[serde(default)]
    pub follows: Vec<SeedFollow>,
    #[serde(default)]
    pub posts: Vec<SeedPost>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedUser {
    pub name: String,
    #[serde(default)]
    pub address: String,
    pub email: String,
    pub username: String,
}

/// Follow edge, both ends by username.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedFollow {
    pub follower: String,
    pub target: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedPost {
    pub author: String,
    pub content: String,
}

/// Counts of what a seed run inserted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub users: usize,
    pub follows: usize,
    pub posts: usize,
}

impl SeedData {
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| AppError::InvalidSeed(e.to_string()))
    }

    /// Applies users, then follows, then posts. Stops at the first failure;
    /// whatever was applied before it stays in the registry.
    pub fn apply(&self, registry: &mut Registry) -> Result<SeedReport> {
        let mut report = SeedReport::default();

        for u in &self.users {
            registry
                .create_account(&u.name, &u.address, &u.email, &u.username)
                .map_err(seed_error)?;
            report.users += 1;
        }

        for f in &self.follows {
            let follower = lookup(registry, &f.follower)?;
            if registry.follow_user(follower, &f.target).map_err(seed_error)? {
                report.follows += 1;
            }
        }

        for p in &self.posts {
            let author = lookup(registry, &p.author)?;
            registry.post_message(author, &p.content).map_err(seed_error)?;
            report.posts += 1;
        }

        info!(
            users = report.users,
            follows = report.follows,
            posts = report.posts,
            "seed data applied"
        );
        Ok(report)
    }
}

fn lookup(registry: &Registry, username: &str) -> Result<crate::models::UserId> {
    registry
        .user_by_username(username)
        .map(|u| u.id())
        .ok_or_else(|| seed_error(AppError::UnknownUser(username.to_string())))
}

fn seed_error(err: AppError) -> AppError {
    AppError::InvalidSeed(err.to_string())
}
