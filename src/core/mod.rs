//! Pure functional core
//!
//! Everything in this module is synchronous and free of I/O and shared state:
//! - Take inputs and return new outputs
//! - Never mutate the values they are given
//! - Are safe to call re-entrantly from any number of callers

pub mod collections;
pub mod compose;
pub mod counter;
pub mod form;
pub mod group;
pub mod path_update;

pub use compose::{compose, identity, partial, pipe, try_compose, try_pipe, Chain, Stage, TryStage};
pub use counter::Counter;
pub use form::Form;
pub use group::{group_by, group_by_with, try_group_by, GroupOptions, Groups};
pub use path_update::{get, update, KeyPath, Node, PathError, PathKey};
