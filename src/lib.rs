//! # fnkit
//!
//! Small functional-programming utilities with a CLI that demonstrates them.
//!
//! ## Usage
//!
//! ```bash
//! fnkit demo [--json]
//! fnkit update --path address.city --value '"Boston"' [--input profile.json]
//! ```
//!
//! ## Modules
//!
//! - `core` - Pure functions: composition, structural path updates, grouping
//! - `debounce` - Trailing-edge debouncer driven by the tokio timer
//! - `config` - Layered configuration (defaults, YAML file, `FNKIT_*` env)
//! - `demo` - Scenarios that exercise the library on sample data
//! - `error` - Error type with stable codes and exit statuses
//!
//! ```
//! use fnkit::core::{pipe, Stage};
//!
//! let add5 = |x: i64| x + 5;
//! let triple = |x: i64| x * 3;
//! let piped = pipe(vec![Box::new(add5) as Stage<i64>, Box::new(triple)]);
//! assert_eq!(piped(5), 30);
//! ```
pub mod config;
pub mod core;
pub mod debounce;
pub mod demo;
pub mod error;

pub use debounce::{DebounceError, Debouncer};
pub use error::{FnkitError, Result};
