//! # Friend Suggestions
//!
//! Second-degree connections: people followed by the people you follow,
//! minus yourself and anyone you already follow.

use crate::models::UserId;
use crate::traits::{FollowGraph, SuggestionEngine};

/// Suggests friends-of-friends in discovery order, uncapped and unranked.
#[derive(Debug, Default, Clone, Copy)]
pub struct SecondDegree;

impl SuggestionEngine for SecondDegree {
    fn suggest(&self, graph: &dyn FollowGraph, user: UserId) -> Vec<UserId> {
        let direct = graph.following_of(user);
        let mut found = Vec::new();

        for &friend in direct {
            for &candidate in graph.following_of(friend) {
                if candidate == user || direct.contains(&candidate) || found.contains(&candidate) {
                    continue;
                }
                found.push(candidate);
            }
        }

        tracing::debug!(user = %user, count = found.len(), "computed friend suggestions");
        found
    }
}
