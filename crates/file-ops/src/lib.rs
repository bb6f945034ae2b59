//! File and folder operations inside a single project.
//!
//! Every public operation takes a [`PathResolver`](studiofs_sandbox::PathResolver)
//! for the project and resolves the caller's relative path through it before
//! touching storage, so a containment failure is always reported before any
//! side effect.

mod copy;
mod delete;
mod error;
mod ops;
mod tree;

pub use copy::copy_tree;
pub use delete::remove_tree;
pub use error::FileOpsError;
pub use ops::{create_file, create_folder, delete_path, read_file, rename, write_file};
pub use tree::{DEFAULT_MAX_DEPTH, TreeOptions, list_tree};
