//! # AppError
//!
//! Centralized error handling for the social network core.
//! Every failure here is recoverable at the call site.

use std::fmt;

use thiserror::Error;

/// Which uniqueness index rejected an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityKey {
    Email,
    Username,
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Email => f.write_str("email"),
            Self::Username => f.write_str("username"),
        }
    }
}

/// The primary error type for all sn-core operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Account creation hit an email or username that is already registered
    #[error("{key} already registered: {value}")]
    DuplicateIdentity { key: IdentityKey, value: String },

    /// Login, follow target or id lookup found nobody
    #[error("unknown user: {0}")]
    UnknownUser(String),

    /// A user tried to follow themselves
    #[error("{0} cannot follow themselves")]
    SelfFollow(String),

    /// A session-scoped operation ran with nobody logged in
    #[error("no user is logged in")]
    NoActiveSession,

    /// Seed data was malformed or violated a registry invariant
    #[error("invalid seed data: {0}")]
    InvalidSeed(String),
}

/// A specialized Result type for social network logic.
pub type Result<T> = std::result::Result<T, AppError>;
