//! Immutable collection helpers
//!
//! Each function borrows its input and returns a freshly allocated `Vec`, so
//! callers keep their original sequence untouched.

use std::iter::Sum;

/// Pure: Return a copy of `items` with `item` appended
pub fn append<T: Clone>(items: &[T], item: T) -> Vec<T> {
    items.iter().cloned().chain(std::iter::once(item)).collect()
}

/// Pure: Return a copy of `items` where matching elements are replaced by `f(element)`
pub fn update_where<T: Clone>(
    items: &[T],
    predicate: impl Fn(&T) -> bool,
    f: impl Fn(&T) -> T,
) -> Vec<T> {
    items
        .iter()
        .map(|item| if predicate(item) { f(item) } else { item.clone() })
        .collect()
}

/// Pure: Return a copy of `items` without the matching elements
pub fn remove_where<T: Clone>(items: &[T], predicate: impl Fn(&T) -> bool) -> Vec<T> {
    items.iter().filter(|item| !predicate(item)).cloned().collect()
}

/// Pure: Sum a projection of every element
pub fn sum_by<T, S: Sum<S>>(items: &[T], f: impl Fn(&T) -> S) -> S {
    items.iter().map(f).sum()
}
