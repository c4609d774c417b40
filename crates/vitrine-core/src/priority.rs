//! Priority ordering shared by the loader and every composer.

use std::cmp::Reverse;
use std::sync::Arc;

/// Priority used when neither a contribution nor its extension sets one.
pub const DEFAULT_PRIORITY: i32 = 100;

/// Anything that can carry a priority override.
pub trait Prioritized {
    /// The explicit priority, if any.
    fn priority_override(&self) -> Option<i32>;

    /// The priority used for ordering, falling back to `default`.
    fn effective_priority(&self, default: i32) -> i32 {
        self.priority_override().unwrap_or(default)
    }
}

impl<T: Prioritized + ?Sized> Prioritized for &T {
    fn priority_override(&self) -> Option<i32> {
        (**self).priority_override()
    }
}

impl<T: Prioritized + ?Sized> Prioritized for Arc<T> {
    fn priority_override(&self) -> Option<i32> {
        (**self).priority_override()
    }
}

/// Sorts `items` by effective priority, highest first.
///
/// The sort is stable: items with equal priority keep their relative order.
pub fn sort_by_priority<T: Prioritized>(items: &mut [T], default: i32) {
    items.sort_by_key(|item| Reverse(item.effective_priority(default)));
}

/// Returns borrowed items ordered by effective priority, highest first.
pub fn sorted_by_priority<'a, T, I>(items: I, default: i32) -> Vec<&'a T>
where
    T: Prioritized + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut sorted: Vec<&'a T> = items.into_iter().collect();
    sort_by_priority(&mut sorted, default);
    sorted
}
