//! Slice search helpers.

/// Search outwards from `start`, nearest neighbours first.
///
/// At each distance the left neighbour is checked before the right one. The
/// item at `start` itself is never tested. Returns the index of the first
/// item satisfying `predicate`.
pub fn outward_search<T, F>(items: &[T], start: usize, mut predicate: F) -> Option<usize>
where
    F: FnMut(&T) -> bool,
{
    let reach = start.max(items.len().saturating_sub(start + 1));
    for distance in 1..=reach {
        if let Some(left) = start.checked_sub(distance) {
            if items.get(left).is_some_and(&mut predicate) {
                return Some(left);
            }
        }
        let right = start + distance;
        if items.get(right).is_some_and(&mut predicate) {
            return Some(right);
        }
    }
    None
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_prefers_left_at_equal_distance() {
        let items = [1, 1, 0, 1, 1];
        assert_eq!(outward_search(&items, 2, |&v| v == 1), Some(1));
    }

    #[test]
    fn test_expands_until_match() {
        let items = [0, 0, 0, 0, 1];
        assert_eq!(outward_search(&items, 1, |&v| v == 1), Some(4));
        let items = [1, 0, 0, 0, 0];
        assert_eq!(outward_search(&items, 3, |&v| v == 1), Some(0));
    }

    #[test]
    fn test_skips_start() {
        let items = [0, 1, 0];
        assert_eq!(outward_search(&items, 1, |&v| v == 1), None);
    }

    #[test]
    fn test_empty_and_out_of_range() {
        let items: [u8; 0] = [];
        assert_eq!(outward_search(&items, 0, |_| true), None);
        let items = [1, 1];
        assert_eq!(outward_search(&items, 5, |_| true), Some(1));
    }
}
