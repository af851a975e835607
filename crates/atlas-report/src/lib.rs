//! Summary-report rendering for Atlas.
//!
//! The layout logic draws onto the abstract [`canvas::Canvas`] capability;
//! [`png::PngCanvas`] is the production raster backed by the `image` crate.
//! The artifact is replaced atomically (write-then-rename) so a concurrent
//! reader never observes a half-written file.

pub mod canvas;
pub mod error;
pub mod font;
pub mod png;
pub mod summary;

pub use error::{Error, Result};
pub use summary::{Summary, write_summary};
