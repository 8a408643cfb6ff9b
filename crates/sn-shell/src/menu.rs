//! Menu selections typed at the prompt.

use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid option: {0:?}")]
pub struct InvalidChoice(pub String);

/// Choices offered before anyone logs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainChoice {
    CreateAccount,
    Login,
    Exit,
}

impl FromStr for MainChoice {
    type Err = InvalidChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(Self::CreateAccount),
            "2" => Ok(Self::Login),
            "3" => Ok(Self::Exit),
            other => Err(InvalidChoice(other.to_string())),
        }
    }
}

/// Choices offered to the logged-in user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserChoice {
    CreatePost,
    SeePosts,
    Follow,
    Suggestions,
    Logout,
}

impl FromStr for UserChoice {
    type Err = InvalidChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(Self::CreatePost),
            "2" => Ok(Self::SeePosts),
            "3" => Ok(Self::Follow),
            "4" => Ok(Self::Suggestions),
            "5" => Ok(Self::Logout),
            other => Err(InvalidChoice(other.to_string())),
        }
    }
}
