//! # Registry
//!
//! Owns every `User`, keeps the email and username indices in step and
//! tracks the single logged-in session.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::error::{AppError, IdentityKey, Result};
use crate::models::{Post, User, UserId};
use crate::suggestions::SecondDegree;
use crate::traits::{Clock, FollowGraph, SuggestionEngine, SystemClock};

pub struct Registry {
    users: HashMap<UserId, User>,
    /// Account creation order, used for enumeration
    creation_order: Vec<UserId>,
    users_by_email: HashMap<String, UserId>,
    users_by_username: HashMap<String, UserId>,
    current_session: Option<UserId>,
    clock: Box<dyn Clock>,
    suggester: Box<dyn SuggestionEngine>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Empty registry using wall-clock time and second-degree suggestions.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self {
            users: HashMap::new(),
            creation_order: Vec::new(),
            users_by_email: HashMap::new(),
            users_by_username: HashMap::new(),
            current_session: None,
            clock: Box::new(clock),
            suggester: Box::new(SecondDegree),
        }
    }

    /// Swaps the engine used by `friend_suggestions`.
    pub fn with_suggestion_engine(mut self, engine: impl SuggestionEngine + 'static) -> Self {
        self.suggester = Box::new(engine);
        self
    }

    // Accounts

    /// Registers a new account.
    ///
    /// Rejected with `DuplicateIdentity` if either the email or the username
    /// is taken; nothing changes in that case. Inputs are not validated.
    pub fn create_account(
        &mut self,
        name: impl Into<String>,
        address: impl Into<String>,
        email: impl Into<String>,
        username: impl Into<String>,
    ) -> Result<&User> {
        let email = email.into();
        let username = username.into();

        if self.users_by_email.contains_key(&email) {
            info!(%email, "account rejected: email taken");
            return Err(AppError::DuplicateIdentity { key: IdentityKey::Email, value: email });
        }
        if self.users_by_username.contains_key(&username) {
            info!(%username, "account rejected: username taken");
            return Err(AppError::DuplicateIdentity { key: IdentityKey::Username, value: username });
        }

        let user = User::new(name.into(), address.into(), email.clone(), username.clone());
        let id = user.id();
        self.users_by_email.insert(email, id);
        self.users_by_username.insert(username, id);
        self.creation_order.push(id);
        info!(user_id = %id, username = user.username(), "account created");

        let user: &User = self.users.entry(id).or_insert(user);
        Ok(user)
    }

    pub fn user(&self, id: UserId) -> Option<&User> {
        self.users.get(&id)
    }

    pub fn user_by_username(&self, username: &str) -> Option<&User> {
        self.users_by_username.get(username).and_then(|id| self.users.get(id))
    }

    pub fn user_by_email(&self, email: &str) -> Option<&User> {
        self.users_by_email.get(email).and_then(|id| self.users.get(id))
    }

    /// Every user, oldest account first.
    pub fn all_users(&self) -> impl Iterator<Item = &User> + '_ {
        self.creation_order.iter().filter_map(|id| self.users.get(id))
    }

    pub fn user_count(&self) -> usize {
        self.creation_order.len()
    }

    // Session

    /// Makes `username` the current session, replacing whoever was logged in.
    /// On `UnknownUser` the previous session is left alone.
    pub fn login(&mut self, username: &str) -> Result<&User> {
        let id = *self
            .users_by_username
            .get(username)
            .ok_or_else(|| AppError::UnknownUser(username.to_string()))?;

        if let Some(previous) = self.current_session.replace(id) {
            if previous != id {
                debug!(previous = %previous, "session replaced");
            }
        }
        info!(user_id = %id, %username, "logged in");
        self.require(id)
    }

    /// Clears the session. Safe to call when nobody is logged in.
    pub fn logout(&mut self) {
        if let Some(id) = self.current_session.take() {
            info!(user_id = %id, "logged out");
        }
    }

    pub fn current_session(&self) -> Option<&User> {
        self.current_session.and_then(|id| self.users.get(&id))
    }

    /// Id of the logged-in user, or `NoActiveSession`.
    pub fn session_user(&self) -> Result<UserId> {
        self.current_session.ok_or(AppError::NoActiveSession)
    }

    // Content

    /// Appends a post to `author`'s feed, stamped by the registry clock.
    pub fn post_message(&mut self, author: UserId, content: impl Into<String>) -> Result<&Post> {
        let now = self.clock.now();
        let user = self
            .users
            .get_mut(&author)
            .ok_or_else(|| AppError::UnknownUser(author.to_string()))?;
        let post = user.post_message(content, now);
        debug!(user_id = %author, post_id = %post.id, "post created");
        Ok(post)
    }

    pub fn display_posts(&self, user: UserId) -> Result<&[Post]> {
        Ok(self.require(user)?.display_posts())
    }

    /// Every user's posts, grouped per user in account creation order.
    pub fn feed(&self) -> impl Iterator<Item = (&User, &[Post])> + '_ {
        self.all_users().map(|user| (user, user.display_posts()))
    }

    // Graph

    /// Makes `follower` follow the account named `target_username`.
    ///
    /// Fails with `UnknownUser` if either side is missing and `SelfFollow`
    /// if they are the same account. Returns `false` when the edge already
    /// existed.
    pub fn follow_user(&mut self, follower: UserId, target_username: &str) -> Result<bool> {
        let target = *self
            .users_by_username
            .get(target_username)
            .ok_or_else(|| AppError::UnknownUser(target_username.to_string()))?;
        if target == follower {
            return Err(AppError::SelfFollow(target_username.to_string()));
        }

        let user = self
            .users
            .get_mut(&follower)
            .ok_or_else(|| AppError::UnknownUser(follower.to_string()))?;
        let added = user.follow_user(target);
        if added {
            info!(user_id = %follower, target = target_username, "now following");
        }
        Ok(added)
    }

    /// Friend suggestions for `user`, resolved to accounts.
    pub fn friend_suggestions(&self, user: UserId) -> Result<Vec<&User>> {
        self.require(user)?;
        Ok(self
            .suggester
            .suggest(self, user)
            .into_iter()
            .filter_map(|id| self.users.get(&id))
            .collect())
    }

    fn require(&self, id: UserId) -> Result<&User> {
        self.users.get(&id).ok_or_else(|| AppError::UnknownUser(id.to_string()))
    }
}

impl FollowGraph for Registry {
    fn following_of(&self, user: UserId) -> &[UserId] {
        self.users.get(&user).map(User::following).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::MockClock;
    use chrono::{TimeZone, Utc};

    fn fixed_clock() -> MockClock {
        let mut clock = MockClock::new();
        clock
            .expect_now()
            .return_const(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap());
        clock
    }

    fn registry_with(names: &[&str]) -> (Registry, Vec<UserId>) {
        let mut registry = Registry::with_clock(fixed_clock());
        let ids = names
            .iter()
            .map(|n| {
                registry
                    .create_account(*n, "1 Main St", format!("{n}@x.com"), *n)
                    .unwrap()
                    .id()
            })
            .collect();
        (registry, ids)
    }

    #[test]
    fn test_create_account_indexes_both_keys() {
        let (registry, ids) = registry_with(&["alice"]);
        assert_eq!(registry.user_by_username("alice").unwrap().id(), ids[0]);
        assert_eq!(registry.user_by_email("alice@x.com").unwrap().id(), ids[0]);
        assert_eq!(registry.user_count(), 1);
        assert!(registry.current_session().is_none());
    }

    #[test]
    fn test_duplicate_email_rejected() {
        let (mut registry, _) = registry_with(&["alice"]);
        let err = registry
            .create_account("Carol", "", "alice@x.com", "carol")
            .unwrap_err();
        assert_eq!(
            err,
            AppError::DuplicateIdentity { key: IdentityKey::Email, value: "alice@x.com".into() }
        );
        assert_eq!(registry.user_count(), 1);
        assert!(registry.user_by_username("carol").is_none());
    }

    #[test]
    fn test_duplicate_username_rejected() {
        let (mut registry, _) = registry_with(&["alice"]);
        let err = registry
            .create_account("Other", "", "other@x.com", "alice")
            .unwrap_err();
        assert!(matches!(err, AppError::DuplicateIdentity { key: IdentityKey::Username, .. }));
        assert!(registry.user_by_email("other@x.com").is_none());
    }

    #[test]
    fn test_login_overwrites_session() {
        let (mut registry, ids) = registry_with(&["alice", "bob"]);
        registry.login("alice").unwrap();
        registry.login("bob").unwrap();
        assert_eq!(registry.current_session().unwrap().id(), ids[1]);
    }

    #[test]
    fn test_failed_login_keeps_session() {
        let (mut registry, ids) = registry_with(&["alice"]);
        registry.login("alice").unwrap();
        let err = registry.login("nobody").unwrap_err();
        assert_eq!(err, AppError::UnknownUser("nobody".into()));
        assert_eq!(registry.session_user().unwrap(), ids[0]);
    }

    #[test]
    fn test_logout_is_idempotent() {
        let (mut registry, _) = registry_with(&["alice"]);
        registry.logout();
        registry.login("alice").unwrap();
        registry.logout();
        registry.logout();
        assert!(registry.current_session().is_none());
        assert_eq!(registry.session_user(), Err(AppError::NoActiveSession));
    }

    #[test]
    fn test_posts_keep_order_and_clock_time() {
        let (mut registry, ids) = registry_with(&["alice"]);
        registry.post_message(ids[0], "first").unwrap();
        registry.post_message(ids[0], "").unwrap();
        registry.post_message(ids[0], "third").unwrap();

        let posts = registry.display_posts(ids[0]).unwrap();
        let contents: Vec<_> = posts.iter().map(|p| p.content.as_str()).collect();
        assert_eq!(contents, ["first", "", "third"]);
        assert!(posts.iter().all(|p| p.author == ids[0]));
        assert_eq!(posts[0].created_at, Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap());
    }

    #[test]
    fn test_post_for_unknown_user_fails() {
        let (mut registry, _) = registry_with(&[]);
        assert!(matches!(
            registry.post_message(UserId::new(), "hi"),
            Err(AppError::UnknownUser(_))
        ));
    }

    #[test]
    fn test_follow_rules() {
        let (mut registry, ids) = registry_with(&["alice", "bob"]);
        assert_eq!(registry.follow_user(ids[0], "bob"), Ok(true));
        assert_eq!(registry.follow_user(ids[0], "bob"), Ok(false));
        assert_eq!(registry.user(ids[0]).unwrap().following(), &[ids[1]]);

        assert_eq!(
            registry.follow_user(ids[0], "alice"),
            Err(AppError::SelfFollow("alice".into()))
        );
        assert_eq!(
            registry.follow_user(ids[0], "zed"),
            Err(AppError::UnknownUser("zed".into()))
        );
        assert!(registry.user(ids[1]).unwrap().following().is_empty());
    }

    #[test]
    fn test_feed_groups_by_creation_order() {
        let (mut registry, ids) = registry_with(&["alice", "bob", "carol"]);
        registry.post_message(ids[1], "from bob").unwrap();
        registry.post_message(ids[0], "from alice").unwrap();

        let feed: Vec<_> = registry
            .feed()
            .map(|(user, posts)| (user.username().to_string(), posts.len()))
            .collect();
        assert_eq!(
            feed,
            [("alice".to_string(), 1), ("bob".to_string(), 1), ("carol".to_string(), 0)]
        );
    }

    #[test]
    fn test_friend_suggestions_resolve_users() {
        let (mut registry, ids) = registry_with(&["a", "b", "c", "d"]);
        registry.follow_user(ids[0], "b").unwrap();
        registry.follow_user(ids[1], "c").unwrap();
        registry.follow_user(ids[1], "d").unwrap();

        let names: Vec<_> = registry
            .friend_suggestions(ids[0])
            .unwrap()
            .into_iter()
            .map(User::username)
            .collect();
        assert_eq!(names, ["c", "d"]);
    }

    #[test]
    fn test_custom_suggestion_engine() {
        struct Nobody;
        impl SuggestionEngine for Nobody {
            fn suggest(&self, _: &dyn FollowGraph, _: UserId) -> Vec<UserId> {
                Vec::new()
            }
        }

        let (registry, ids) = registry_with(&["a", "b", "c"]);
        let mut registry = registry.with_suggestion_engine(Nobody);
        registry.follow_user(ids[0], "b").unwrap();
        registry.follow_user(ids[1], "c").unwrap();
        assert!(registry.friend_suggestions(ids[0]).unwrap().is_empty());
    }
}
