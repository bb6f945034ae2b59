//! A single-slot clipboard for project entries.
//!
//! The slot is either empty or holds one entry marked for copy or cut.
//! Pasting a copied entry duplicates it and keeps the slot; pasting a cut
//! entry moves it and empties the slot. A failed paste leaves the slot as it
//! was.

mod error;
mod manager;

pub use error::ClipboardError;
pub use manager::{Clipboard, ClipboardEntry, ClipboardState};
