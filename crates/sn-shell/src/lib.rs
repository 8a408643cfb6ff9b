//! # sn-shell
//!
//! The interactive console layer. Reads menu choices from any `BufRead`,
//! drives the `Registry` and writes replies to any `Write`. Domain
//! failures become messages; only I/O errors end the loop early.

pub mod menu;
pub mod render;

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use sn_core::{AppError, Registry};
use tracing::debug;

use crate::menu::{MainChoice, UserChoice};

/// Whether the loop should keep going after a screen returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    /// Input ran out
    Quit,
}

pub struct Shell<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Runs until the user picks Exit or input is exhausted. Any session
    /// still active at that point is logged out.
    pub fn run(&mut self, registry: &mut Registry) -> Result<()> {
        loop {
            render::main_menu(&mut self.output)?;
            let Some(line) = self.prompt("Enter your choice: ")? else {
                break;
            };

            let flow = match line.parse::<MainChoice>() {
                Ok(MainChoice::CreateAccount) => self.create_account(registry)?,
                Ok(MainChoice::Login) => self.login(registry)?,
                Ok(MainChoice::Exit) => {
                    writeln!(self.output, "Exiting the Social Network. Goodbye!")?;
                    break;
                }
                Err(err) => {
                    debug!(%err, "main menu");
                    writeln!(self.output, "Invalid option. Please try again.")?;
                    Flow::Continue
                }
            };
            if flow == Flow::Quit {
                break;
            }
        }

        registry.logout();
        self.output.flush().context("flush console output")?;
        Ok(())
    }

    fn create_account(&mut self, registry: &mut Registry) -> Result<Flow> {
        let Some(name) = self.prompt("Enter your name: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(address) = self.prompt("Enter your address: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(email) = self.prompt("Enter your email: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(username) = self.prompt("Choose a username: ")? else {
            return Ok(Flow::Quit);
        };

        match registry.create_account(name, address, email, username) {
            Ok(_) => writeln!(self.output, "Account created successfully!")?,
            Err(AppError::DuplicateIdentity { .. }) => writeln!(
                self.output,
                "Email or username already in use. Account creation failed."
            )?,
            Err(err) => return Err(err.into()),
        }
        Ok(Flow::Continue)
    }

    fn login(&mut self, registry: &mut Registry) -> Result<Flow> {
        let Some(username) = self.prompt("Enter your username: ")? else {
            return Ok(Flow::Quit);
        };

        match registry.login(&username) {
            Ok(user) => writeln!(self.output, "Welcome, {}!", user.name())?,
            Err(AppError::UnknownUser(_)) => {
                writeln!(self.output, "Login failed. Invalid username.")?;
                return Ok(Flow::Continue);
            }
            Err(err) => return Err(err.into()),
        }
        self.user_session(registry)
    }

    fn user_session(&mut self, registry: &mut Registry) -> Result<Flow> {
        let me = registry.session_user()?;

        loop {
            render::user_menu(&mut self.output)?;
            let Some(line) = self.prompt("Enter your choice: ")? else {
                return Ok(Flow::Quit);
            };

            match line.parse::<UserChoice>() {
                Ok(UserChoice::CreatePost) => {
                    let Some(content) = self.prompt("Enter your post: ")? else {
                        return Ok(Flow::Quit);
                    };
                    registry.post_message(me, content)?;
                    writeln!(self.output, "Post created successfully!")?;
                }
                Ok(UserChoice::SeePosts) => render::feed(&mut self.output, registry)?,
                Ok(UserChoice::Follow) => {
                    let Some(target) =
                        self.prompt("Enter the username of the user you want to follow: ")?
                    else {
                        return Ok(Flow::Quit);
                    };
                    self.follow(registry, me, &target)?;
                }
                Ok(UserChoice::Suggestions) => {
                    let users = registry.friend_suggestions(me)?;
                    render::suggestions(&mut self.output, &users)?;
                }
                Ok(UserChoice::Logout) => {
                    if let Some(user) = registry.current_session() {
                        writeln!(self.output, "Goodbye, {}!", user.name())?;
                    }
                    registry.logout();
                    return Ok(Flow::Continue);
                }
                Err(err) => {
                    debug!(%err, "user menu");
                    writeln!(self.output, "Invalid option. Please try again.")?;
                }
            }
        }
    }

    fn follow(&mut self, registry: &mut Registry, me: sn_core::UserId, target: &str) -> Result<()> {
        match registry.follow_user(me, target) {
            Ok(true) => writeln!(self.output, "You are now following {target}!")?,
            Ok(false) => writeln!(self.output, "You already follow {target}.")?,
            Err(AppError::SelfFollow(_)) => writeln!(self.output, "You cannot follow yourself.")?,
            Err(AppError::UnknownUser(_)) => writeln!(self.output, "No user named {target}.")?,
            Err(err) => return Err(err.into()),
        }
        Ok(())
    }

    /// Prints `label`, then reads one line. `None` at end of input.
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush().context("flush prompt")?;

        let mut line = String::new();
        let read = self.input.read_line(&mut line).context("read console input")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_script(registry: &mut Registry, script: &str) -> String {
        let mut shell = Shell::new(Cursor::new(script.to_string()), Vec::new());
        shell.run(registry).unwrap();
        String::from_utf8(shell.into_output()).unwrap()
    }

    #[test]
    fn test_create_account_and_reject_duplicate() {
        let mut registry = Registry::new();
        let out = run_script(
            &mut registry,
            "1\nAlice\n1 Main St\na@x.com\nalice\n1\nCarol\n\na@x.com\ncarol\n3\n",
        );
        assert!(out.contains("Account created successfully!"));
        assert!(out.contains("Email or username already in use. Account creation failed."));
        assert!(out.ends_with("Exiting the Social Network. Goodbye!\n"));
        assert_eq!(registry.user_count(), 1);
    }

    #[test]
    fn test_unknown_login_and_invalid_option() {
        let mut registry = Registry::new();
        let out = run_script(&mut registry, "2\nghost\n9\n3\n");
        assert!(out.contains("Login failed. Invalid username."));
        assert!(out.contains("Invalid option. Please try again."));
    }

    #[test]
    fn test_post_follow_and_logout() {
        let mut registry = Registry::new();
        registry.create_account("Alice", "", "a@x.com", "alice").unwrap();
        registry.create_account("Bob", "", "b@x.com", "bob").unwrap();

        let out = run_script(
            &mut registry,
            "2\nbob\n1\nhello\n3\nalice\n3\nalice\n3\nbob\n3\nzed\n5\n3\n",
        );
        assert!(out.contains("Welcome, Bob!"));
        assert!(out.contains("Post created successfully!"));
        assert!(out.contains("You are now following alice!"));
        assert!(out.contains("You already follow alice."));
        assert!(out.contains("You cannot follow yourself."));
        assert!(out.contains("No user named zed."));
        assert!(out.contains("Goodbye, Bob!"));
        assert!(registry.current_session().is_none());

        let bob = registry.user_by_username("bob").unwrap();
        assert_eq!(bob.display_posts()[0].content, "hello");
        assert_eq!(bob.following().len(), 1);
    }

    #[test]
    fn test_end_of_input_logs_out() {
        let mut registry = Registry::new();
        registry.create_account("Alice", "", "a@x.com", "alice").unwrap();

        let out = run_script(&mut registry, "2\nalice\n1\n");
        assert!(out.ends_with("Enter your post: "));
        assert!(registry.current_session().is_none());
        assert!(registry.user_by_username("alice").unwrap().display_posts().is_empty());
    }
}
