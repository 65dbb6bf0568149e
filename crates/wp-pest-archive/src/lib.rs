//! Remote archive acquisition and assembly.
//!
//! Downloading is separated from extraction so transport failures and
//! disk/merge failures stay distinguishable at the orchestration layer.

pub mod extract;
pub mod fetch;

pub use extract::{extract_and_flatten, ExtractError};
pub use fetch::{fetch_to_file, FetchError};
