//! Ordered-list splicing.
//!
//! Every reordering in the tree comes down to one of these functions. They
//! follow splice semantics: an item is removed first, then inserted, and an
//! insertion index past the end means "append".

/// Moves the item at `from` so that it ends up at position `to`.
///
/// `to` is the index the item occupies after the move, so moving an item past
/// its own old position works as expected. An out-of-range `to` is clamped to
/// the end of the list.
///
/// Returns `false` (and leaves the list untouched) if `from` is out of range
/// or the item would not move.
///
/// # Examples
///
/// ```
/// use orcganizer_protocol::reorder::move_within;
///
/// let mut items = vec!['a', 'b', 'c', 'd'];
/// assert!(move_within(&mut items, 0, 2));
/// assert_eq!(items, ['b', 'c', 'a', 'd']);
///
/// assert!(!move_within(&mut items, 1, 1));
/// assert!(!move_within(&mut items, 9, 0));
/// ```
pub fn move_within<T>(items: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from >= items.len() {
        return false;
    }
    let to = to.min(items.len() - 1);
    if from == to {
        return false;
    }
    let item = items.remove(from);
    items.insert(to, item);
    true
}

/// Inserts `item` at `index`, or at the end if `index` is past it.
///
/// Returns the index the item was inserted at.
///
/// # Examples
///
/// ```
/// use orcganizer_protocol::reorder::insert_clamped;
///
/// let mut items = vec![1, 2];
/// assert_eq!(insert_clamped(&mut items, 10, 3), 2);
/// assert_eq!(insert_clamped(&mut items, 0, 0), 0);
/// assert_eq!(items, [0, 1, 2, 3]);
/// ```
pub fn insert_clamped<T>(items: &mut Vec<T>, index: usize, item: T) -> usize {
    let index = index.min(items.len());
    items.insert(index, item);
    index
}

/// Removes and returns the item at `index`, if there is one.
pub fn remove_at<T>(items: &mut Vec<T>, index: usize) -> Option<T> {
    (index < items.len()).then(|| items.remove(index))
}

/// Moves the item at `from` in `source` to position `to` in `destination`.
///
/// Returns `false` (and leaves both lists untouched) if `from` is out of
/// range.
///
/// # Examples
///
/// ```
/// use orcganizer_protocol::reorder::move_between;
///
/// let mut left = vec!['a', 'b'];
/// let mut right = vec!['x'];
/// assert!(move_between(&mut left, 1, &mut right, 0));
/// assert_eq!(left, ['a']);
/// assert_eq!(right, ['b', 'x']);
/// ```
pub fn move_between<T>(
    source: &mut Vec<T>,
    from: usize,
    destination: &mut Vec<T>,
    to: usize,
) -> bool {
    let Some(item) = remove_at(source, from) else {
        return false;
    };
    insert_clamped(destination, to, item);
    true
}


#[cfg(test)]
mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    fn sorted(mut items: Vec<u32>) -> Vec<u32> {
        items.sort_unstable();
        items
    }

    proptest! {
        /// Moving within a list only changes order, never content.
        #[test]
        fn move_within_preserves_multiset(
            items in proptest::collection::vec(0u32..20, 1..30),
            from in 0usize..40,
            to in 0usize..40,
        ) {
            let mut moved = items.clone();
            move_within(&mut moved, from, to);
            prop_assert_eq!(moved.len(), items.len());
            prop_assert_eq!(sorted(moved), sorted(items));
        }

        /// Moving an item onto its own position is an identity.
        #[test]
        fn move_to_same_position_is_identity(
            items in proptest::collection::vec(0u32..20, 1..30),
            index in 0usize..30,
        ) {
            let index = index % items.len();
            let mut moved = items.clone();
            prop_assert!(!move_within(&mut moved, index, index));
            prop_assert_eq!(moved, items);
        }

        /// The moved item lands exactly at the clamped destination index.
        #[test]
        fn moved_item_lands_at_destination(
            items in proptest::collection::vec(0u32..1000, 1..30),
            from in 0usize..30,
            to in 0usize..40,
        ) {
            let from = from % items.len();
            let expected_at = to.min(items.len() - 1);
            let item = items[from];
            let mut moved = items.clone();
            move_within(&mut moved, from, to);
            prop_assert_eq!(moved[expected_at], item);
        }

        /// An item moved between lists leaves exactly one list and joins exactly the other.
        #[test]
        fn move_between_conserves_total(
            left in proptest::collection::vec(0u32..20, 0..20),
            right in proptest::collection::vec(0u32..20, 0..20),
            from in 0usize..25,
            to in 0usize..25,
        ) {
            let mut l = left.clone();
            let mut r = right.clone();
            let moved = move_between(&mut l, from, &mut r, to);
            prop_assert_eq!(l.len() + r.len(), left.len() + right.len());
            if moved {
                prop_assert_eq!(l.len() + 1, left.len());
                prop_assert_eq!(r.len(), right.len() + 1);
            } else {
                prop_assert_eq!(l, left);
                prop_assert_eq!(r, right);
            }
        }
    }
}
