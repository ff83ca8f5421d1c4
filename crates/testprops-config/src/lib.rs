//! Test property loading and validation.
//!
//! A `test.properties` descriptor tells the build-and-test harness how to run
//! one job: the project language, timeouts, output limits, and the settings
//! for either the Java or the Makefile build family. [`PropertyStore`] loads
//! the descriptor from a file, a stream, or a tar or zip archive, resolves every
//! typed field with alias and default handling, and fails fast when the
//! language is missing.

pub mod archive;
pub mod keys;
pub mod parser;
mod store;

pub use archive::{ArchiveEntry, EntrySource, ZipStream};
pub use store::{BuildFamily, PropertyKeys, PropertyStore};
