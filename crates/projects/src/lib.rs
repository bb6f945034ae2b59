//! Projects: the named folders directly under the projects root.
//!
//! [`ProjectStore`] lists, scaffolds and deletes them. Scaffolding is the
//! only operation in studiofs with rollback: if any starter file cannot be
//! written the new project directory is removed again.

mod error;
mod store;
pub mod templates;

pub use error::ProjectError;
pub use store::{FsTemplateWriter, ProjectStore, TemplateWriter};
