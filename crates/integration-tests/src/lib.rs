//! Shared fixtures for the cross-crate tests under `tests/`.

use chrono::{DateTime, TimeZone, Utc};
use sn_core::{MockClock, Registry, UserId};

pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

/// Registry whose clock always reports `fixed_time()`.
pub fn fixed_registry() -> Registry {
    let mut clock = MockClock::new();
    clock.expect_now().return_const(fixed_time());
    Registry::with_clock(clock)
}

/// Registers one account per username (`<name>@x.com`) and returns their ids
/// in the same order.
pub fn registry_with(usernames: &[&str]) -> (Registry, Vec<UserId>) {
    let mut registry = fixed_registry();
    let ids = usernames
        .iter()
        .map(|&name| {
            registry
                .create_account(name.to_uppercase(), "", format!("{name}@x.com"), name)
                .expect("fixture usernames are unique")
                .id()
        })
        .collect();
    (registry, ids)
}

/// Follows each `(follower, target)` pair by username.
pub fn follow_all(registry: &mut Registry, edges: &[(&str, &str)]) {
    for &(from, to) in edges {
        let id = registry.user_by_username(from).expect("known follower").id();
        registry.follow_user(id, to).expect("valid follow edge");
    }
}
