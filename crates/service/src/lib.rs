//! The studiofs service: one owned object behind every boundary call.
//!
//! [`StudioService`] owns the projects root, the project store and the
//! clipboard, and exposes each operation as a typed method returning
//! [`ServiceError`] on failure. Turning results into wire replies is left
//! to the boundary adapter.

mod error;
mod service;

pub use error::ServiceError;
pub use service::StudioService;

pub use studiofs_file_ops::{DEFAULT_MAX_DEPTH, TreeOptions};
pub use studiofs_sandbox::{ProjectsRoot, SandboxError};
