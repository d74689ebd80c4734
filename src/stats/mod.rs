//! Pure aggregate functions over store snapshots.
//!
//! Everything here is stateless and side-effect-free: the same snapshots
//! always produce the same output. Presentation code calls these with
//! whatever snapshots it holds; nothing is cached.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::api::{Post, User, UserPost};

/// Sentinel returned when a user id cannot be resolved to a name.
pub const UNKNOWN_USER: &str = "Unknown User";

/// Anything carrying a server-assigned creation timestamp.
pub trait Timestamped {
    fn created_at(&self) -> &str;
}

impl Timestamped for User {
    fn created_at(&self) -> &str {
        &self.created_at
    }
}

impl Timestamped for Post {
    fn created_at(&self) -> &str {
        &self.created_at
    }
}

impl Timestamped for UserPost {
    fn created_at(&self) -> &str {
        &self.created_at
    }
}

/// Number of records in a snapshot.
pub fn count_of<T>(records: &[T]) -> usize {
    records.len()
}

/// Mean of a numeric field across a snapshot; `0.0` when empty.
pub fn average_of<T>(records: &[T], value: impl Fn(&T) -> f64) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    records.iter().map(value).sum::<f64>() / records.len() as f64
}

/// Records-per-record ratio between two snapshots; `0.0` when the
/// denominator snapshot is empty.
pub fn ratio_of<A, B>(numerator: &[A], denominator: &[B]) -> f64 {
    if denominator.is_empty() {
        return 0.0;
    }
    numerator.len() as f64 / denominator.len() as f64
}

/// The `n` most recently created records, newest first.
///
/// Sorting is stable: records with equal timestamps keep their snapshot
/// order. Timestamps that fail to parse sort as oldest.
pub fn most_recent<T: Timestamped + Clone>(records: &[T], n: usize) -> Vec<T> {
    let mut sorted = records.to_vec();
    sorted.sort_by_key(|r| std::cmp::Reverse(parse_created_at(r.created_at())));
    sorted.truncate(n);
    sorted
}

/// Resolves a user id to the user's name, or [`UNKNOWN_USER`] when no record
/// matches (deleted id, or the user snapshot not yet loaded). Never fails.
pub fn resolve_user_name(users: &[User], user_id: &str) -> String {
    users
        .iter()
        .find(|u| u.id == user_id)
        .map(|u| u.name.clone())
        .unwrap_or_else(|| UNKNOWN_USER.to_string())
}

/// Parses a server timestamp.
///
/// Accepts RFC 3339, and naive datetimes without an offset (common for
/// services that serialize UTC timestamps bare); anything else maps to the
/// minimum instant so it sorts last in recency order.
fn parse_created_at(raw: &str) -> DateTime<Utc> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Utc);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return naive.and_utc();
    }
    DateTime::<Utc>::MIN_UTC
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str, name: &str, age: i64) -> User {
        User {
            id: id.to_string(),
            name: name.to_string(),
            email: format!("{name}@example.com"),
            age,
            created_at: "2024-01-01T00:00:00Z".to_string(),
        }
    }

    fn post(id: &str, created_at: &str) -> Post {
        Post {
            id: id.to_string(),
            user_id: "u1".to_string(),
            title: format!("post {id}"),
            content: String::new(),
            created_at: created_at.to_string(),
        }
    }

    #[test]
    fn test_average_of_empty_is_zero() {
        let users: Vec<User> = Vec::new();
        assert_eq!(average_of(&users, |u| u.age as f64), 0.0);
    }

    #[test]
    fn test_average_of_ages() {
        let users = vec![user("u1", "Ada", 30), user("u2", "Grace", 40)];
        assert_eq!(average_of(&users, |u| u.age as f64), 35.0);
    }

    #[test]
    fn test_ratio_of_empty_denominator_is_zero() {
        let posts = vec![post("p1", "2024-01-01T00:00:00Z")];
        let users: Vec<User> = Vec::new();
        assert_eq!(ratio_of(&posts, &users), 0.0);
    }

    #[test]
    fn test_ratio_of_posts_per_user() {
        let posts = vec![
            post("p1", "2024-01-01T00:00:00Z"),
            post("p2", "2024-01-02T00:00:00Z"),
            post("p3", "2024-01-03T00:00:00Z"),
        ];
        let users = vec![user("u1", "Ada", 30), user("u2", "Grace", 40)];
        assert_eq!(ratio_of(&posts, &users), 1.5);
    }

    #[test]
    fn test_most_recent_sorts_descending_and_truncates() {
        let posts = vec![
            post("old", "2023-06-01T00:00:00Z"),
            post("newest", "2024-03-01T12:00:00Z"),
            post("middle", "2024-01-15T08:30:00Z"),
        ];
        let recent = most_recent(&posts, 2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].id, "newest");
        assert_eq!(recent[1].id, "middle");
    }

    #[test]
    fn test_most_recent_ties_keep_snapshot_order() {
        let posts = vec![
            post("a", "2024-01-01T00:00:00Z"),
            post("b", "2024-01-01T00:00:00Z"),
            post("c", "2024-01-01T00:00:00Z"),
        ];
        let recent = most_recent(&posts, 3);
        let ids: Vec<&str> = recent.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[test]
    fn test_most_recent_n_larger_than_snapshot() {
        let posts = vec![post("p1", "2024-01-01T00:00:00Z")];
        assert_eq!(most_recent(&posts, 5).len(), 1);
    }

    #[test]
    fn test_most_recent_accepts_naive_timestamps() {
        let posts = vec![
            post("older", "2024-01-01T00:00:00"),
            post("newer", "2024-02-01T00:00:00"),
        ];
        let recent = most_recent(&posts, 2);
        assert_eq!(recent[0].id, "newer");
    }

    #[test]
    fn test_most_recent_unparseable_sorts_last() {
        let posts = vec![
            post("garbage", "not-a-timestamp"),
            post("valid", "2024-01-01T00:00:00Z"),
        ];
        let recent = most_recent(&posts, 2);
        assert_eq!(recent[0].id, "valid");
        assert_eq!(recent[1].id, "garbage");
    }

    #[test]
    fn test_resolve_user_name_found() {
        let users = vec![user("u1", "Ada", 30)];
        assert_eq!(resolve_user_name(&users, "u1"), "Ada");
    }

    #[test]
    fn test_resolve_user_name_missing_is_sentinel() {
        let users = vec![user("u1", "Ada", 30)];
        assert_eq!(resolve_user_name(&users, "nonexistent-id"), UNKNOWN_USER);
        assert_eq!(resolve_user_name(&[], "u1"), UNKNOWN_USER);
    }

    #[test]
    fn test_derived_views_are_idempotent() {
        let posts = vec![
            post("p1", "2024-01-02T00:00:00Z"),
            post("p2", "2024-01-01T00:00:00Z"),
        ];
        let users = vec![user("u1", "Ada", 30), user("u2", "Grace", 44)];

        assert_eq!(
            average_of(&users, |u| u.age as f64),
            average_of(&users, |u| u.age as f64)
        );
        assert_eq!(ratio_of(&posts, &users), ratio_of(&posts, &users));
        assert_eq!(most_recent(&posts, 2), most_recent(&posts, 2));
        assert_eq!(count_of(&posts), count_of(&posts));
    }
}
