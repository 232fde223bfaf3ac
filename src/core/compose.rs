//! Function composition and pipelining
//!
//! Builds a single unary function out of an ordered list of unary stages:
//! - `compose`: rightmost stage is applied first, `compose(f, g, h)(x) == f(g(h(x)))`
//! - `pipe`: leftmost stage is applied first, `pipe(f, g, h)(x) == h(g(f(x)))`
//!
//! With zero stages both return the identity. The `try_` variants accept stages
//! returning `Result<T, E>`; the first failing stage aborts the chain and its
//! error is returned unchanged. The [`compose!`](crate::compose) and
//! [`pipe!`](crate::pipe) macros cover chains whose stages change type.
//!
//! # Examples
//!
//! ```
//! use fnkit::core::compose::{compose, pipe, Stage};
//!
//! let add5: fn(i32) -> i32 = |x| x + 5;
//! let multiply3: fn(i32) -> i32 = |x| x * 3;
//! let subtract10: fn(i32) -> i32 = |x| x - 10;
//!
//! let composed = compose(vec![
//!     Box::new(subtract10) as Stage<i32>,
//!     Box::new(multiply3),
//!     Box::new(add5),
//! ]);
//! let piped = pipe(vec![
//!     Box::new(add5) as Stage<i32>,
//!     Box::new(multiply3),
//!     Box::new(subtract10),
//! ]);
//!
//! assert_eq!(composed(5), 20);
//! assert_eq!(piped(5), 20);
//! ```

/// A boxed infallible unary stage
pub type Stage<'a, T> = Box<dyn Fn(T) -> T + 'a>;

/// A boxed fallible unary stage
pub type TryStage<'a, T, E> = Box<dyn Fn(T) -> Result<T, E> + 'a>;

/// Pure: Return the input unchanged
pub fn identity<T>(value: T) -> T {
    value
}

/// Pure: Compose stages right-to-left
///
/// The returned function applies the last stage first. Each call re-runs the
/// whole chain; nothing is cached between calls.
pub fn compose<'a, T: 'a>(stages: Vec<Stage<'a, T>>) -> impl Fn(T) -> T + 'a {
    move |input| stages.iter().rev().fold(input, |acc, stage| stage(acc))
}

/// Pure: Compose stages left-to-right
pub fn pipe<'a, T: 'a>(stages: Vec<Stage<'a, T>>) -> impl Fn(T) -> T + 'a {
    move |input| stages.iter().fold(input, |acc, stage| stage(acc))
}

/// A chain of fallible stages, stored in application order
///
/// Evaluation stops at the first `Err`, which is returned as-is. Later stages
/// are never invoked in that case.
pub struct Chain<'a, T, E> {
    stages: Vec<TryStage<'a, T, E>>,
}

impl<'a, T, E> Chain<'a, T, E> {
    /// Run the chain on `input`
    pub fn call(&self, input: T) -> Result<T, E> {
        self.stages.iter().try_fold(input, |acc, stage| stage(acc))
    }

    /// Append a stage that runs after every existing stage
    pub fn then(mut self, stage: impl Fn(T) -> Result<T, E> + 'a) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Number of stages in the chain
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Whether the chain is the identity
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl<T, E> std::fmt::Debug for Chain<'_, T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chain")
            .field("stages", &self.stages.len())
            .finish()
    }
}

/// Pure: Compose fallible stages right-to-left
pub fn try_compose<'a, T, E>(mut stages: Vec<TryStage<'a, T, E>>) -> Chain<'a, T, E> {
    stages.reverse();
    Chain { stages }
}

/// Pure: Compose fallible stages left-to-right
pub fn try_pipe<T, E>(stages: Vec<TryStage<'_, T, E>>) -> Chain<'_, T, E> {
    Chain { stages }
}

/// Pure: Fix the first argument of a binary function
///
/// `partial(multiply, 2)` behaves like `|x| multiply(2, x)`.
pub fn partial<A, B, R>(f: impl Fn(A, B) -> R, first: A) -> impl Fn(B) -> R
where
    A: Clone,
{
    move |second| f(first.clone(), second)
}

/// Compose functions right-to-left; stage types may differ
///
/// `compose!(f, g, h)(x)` is `f(g(h(x)))`. `compose!()` is the identity.
///
/// ```
/// use fnkit::compose;
///
/// let describe = compose!(|n: usize| format!("{} chars", n), |s: &str| s.len());
/// assert_eq!(describe("hello"), "5 chars");
/// ```
#[macro_export]
macro_rules! compose {
    () => {
        $crate::core::compose::identity
    };
    ($function:expr $(,)?) => {
        $function
    };
    ($outer:expr, $($rest:expr),+ $(,)?) => {{
        let outer = $outer;
        let inner = $crate::compose!($($rest),+);
        move |input| outer(inner(input))
    }};
}

/// Compose functions left-to-right; stage types may differ
///
/// `pipe!(f, g, h)(x)` is `h(g(f(x)))`. `pipe!()` is the identity.
///
/// ```
/// use fnkit::pipe;
///
/// let shout = pipe!(|s: &str| s.trim().to_string(), |s: String| s.to_uppercase());
/// assert_eq!(shout("  hi "), "HI");
/// ```
#[macro_export]
macro_rules! pipe {
    () => {
        $crate::core::compose::identity
    };
    ($function:expr $(,)?) => {
        $function
    };
    ($first:expr, $($rest:expr),+ $(,)?) => {{
        let first = $first;
        let rest = $crate::pipe!($($rest),+);
        move |input| rest(first(input))
    }};
}
