use chrono::Utc;

use crate::model::PostId;

/// Identifier for a post that only lives in local state: the current epoch
/// time in milliseconds, bumped past `last` when the clock has not moved on.
pub fn next_local_id(last: PostId) -> PostId {
    Utc::now().timestamp_millis().max(last + 1)
}

/// Whether a required text field counts as filled in.
pub fn is_filled(text: &str) -> bool {
    !text.trim().is_empty()
}

#[cfg(test)]
mod test {
    use super::{is_filled, next_local_id};

    #[test]
    fn test_local_ids_increase() {
        let first = next_local_id(0);
        assert!(first > 1_600_000_000_000);
        let second = next_local_id(first);
        assert!(second > first);

        let ahead = first + 60_000;
        assert_eq!(next_local_id(ahead), ahead + 1);
    }

    #[test]
    fn test_filled() {
        assert!(is_filled(" a "));
        assert!(!is_filled(" \n\t"));
    }
}
