//! # Domain Models
//!
//! These structs represent the core entities of the social network.
//! We use UUID v7 for time-ordered, globally unique identification.
//! Users refer to each other (and posts to their author) by id only;
//! the `Registry` owns every `User`.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a registered user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A single message authored by a user. Never edited after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    /// Non-owning back-reference, resolved through the `Registry`
    pub author: UserId,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// A registered account with its authored posts and outgoing follow edges.
/// Serialize-only: accounts are created through the `Registry`.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    id: UserId,
    name: String,
    address: String,
    email: String,
    username: String,
    posts: Vec<Post>,
    /// Insertion-ordered set; suggestion order depends on it
    following: Vec<UserId>,
}

impl User {
    /// Only the `Registry` creates users, so uniqueness is checked there.
    pub(crate) fn new(name: String, address: String, email: String, username: String) -> Self {
        Self {
            id: UserId::new(),
            name,
            address,
            email,
            username,
            posts: Vec::new(),
            following: Vec::new(),
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Appends a new post stamped with `created_at` and returns it.
    /// Content is taken as-is; empty messages are allowed.
    pub fn post_message(&mut self, content: impl Into<String>, created_at: DateTime<Utc>) -> &Post {
        self.posts.push(Post {
            id: Uuid::now_v7(),
            author: self.id,
            content: content.into(),
            created_at,
        });
        &self.posts[self.posts.len() - 1]
    }

    /// Posts in the order they were written.
    pub fn display_posts(&self) -> &[Post] {
        &self.posts
    }

    /// Adds `target` to the follow set. Returns `false` if it was already there.
    ///
    /// Self-follow and existence checks belong to the caller
    /// (see `Registry::follow_user`).
    pub fn follow_user(&mut self, target: UserId) -> bool {
        if self.following.contains(&target) {
            return false;
        }
        self.following.push(target);
        true
    }

    pub fn following(&self) -> &[UserId] {
        &self.following
    }

    pub fn is_following(&self, target: UserId) -> bool {
        self.following.contains(&target)
    }
}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for User {}
