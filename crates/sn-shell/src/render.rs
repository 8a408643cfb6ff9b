//! Plain-text rendering of menus and feeds.

use std::io::{self, Write};

use chrono::SecondsFormat;
use sn_core::{Post, Registry, User};

const MAIN_MENU: &str = "\
Welcome to the Social Network!
1. Create Account
2. Login
3. Exit";

const USER_MENU: &str = "\
User Options:
1. Create a Post
2. See All Posts
3. Follow a User
4. See Friend Suggestions
5. Logout";

pub fn main_menu(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "\n{MAIN_MENU}")
}

pub fn user_menu(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "\n{USER_MENU}")
}

/// `[2024-05-01T12:00:00Z] @bob: hello`
pub fn post_line(author: &User, post: &Post) -> String {
    format!(
        "[{}] @{}: {}",
        post.created_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        author.username(),
        post.content
    )
}

/// Every user's posts, grouped per user in account creation order.
pub fn feed(out: &mut impl Write, registry: &Registry) -> io::Result<()> {
    writeln!(out, "\nAll Posts:")?;
    let mut any = false;
    for (user, posts) in registry.feed() {
        for post in posts {
            writeln!(out, "{}", post_line(user, post))?;
            any = true;
        }
    }
    if !any {
        writeln!(out, "No posts yet.")?;
    }
    Ok(())
}

pub fn suggestions(out: &mut impl Write, users: &[&User]) -> io::Result<()> {
    writeln!(out, "Friend Suggestions:")?;
    if users.is_empty() {
        return writeln!(out, "No suggestions right now.");
    }
    for user in users {
        writeln!(out, "{}", user.username())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use sn_core::MockClock;

    #[test]
    fn test_post_line_format() {
        let mut clock = MockClock::new();
        clock
            .expect_now()
            .return_const(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap());
        let mut registry = Registry::with_clock(clock);
        let bob = registry.create_account("Bob", "", "b@x.com", "bob").unwrap().id();
        registry.post_message(bob, "hello").unwrap();

        let user = registry.user(bob).unwrap();
        let line = post_line(user, &user.display_posts()[0]);
        assert_eq!(line, "[2024-05-01T12:00:00Z] @bob: hello");
    }

    #[test]
    fn test_empty_feed() {
        let mut out = Vec::new();
        feed(&mut out, &Registry::new()).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "\nAll Posts:\nNo posts yet.\n");
    }
}
