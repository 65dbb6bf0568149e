//! Foundational pieces shared across wp-pest crates.
//!
//! Provides plugin slug validation and the directory tree operations the
//! archive assembly and scaffolding steps are built on.

pub mod dir_ops;
pub mod slug;

pub use dir_ops::{merge_tree, remove_dir_all_if_exists};
pub use slug::{PluginSlug, SlugError};
