//! testprops - loader and validator for `test.properties` job descriptors
//!
//! A build-and-test harness reads one `test.properties` file per project to
//! learn how to build and test a student submission: the language, build and
//! test timeouts, how much process output to keep, and language-specific
//! settings (Java source level and VM arguments, or Makefile names and the
//! make command). This crate loads that descriptor and answers typed
//! questions about it.
//!
//! # Quick Start
//!
//! ```rust
//! use testprops::PropertyStore;
//!
//! let mut store = PropertyStore::new();
//! store.load_reader("build.language=java\ntest.timeout=10\n".as_bytes())?;
//!
//! assert!(store.is_java()?);
//! assert_eq!(store.test_timeout_in_seconds(), 10);
//! assert_eq!(store.build_timeout_in_seconds(), 180);
//! # Ok::<(), testprops::TestPropsError>(())
//! ```
//!
//! # Loading
//!
//! - [`PropertyStore::load_path`] / [`PropertyStore::from_path`]: a file on disk
//! - [`PropertyStore::load_reader`]: any byte stream
//! - [`PropertyStore::load_tar`], [`PropertyStore::load_tar_gz`]: the
//!   `test.properties` entries of a tar archive
//! - [`PropertyStore::load_zip`]: the same for a zip or jar stream
//! - [`PropertyStore::load_entries`]: any archive implementing [`EntrySource`]
//!
//! A descriptor without `build.language` fails the load with
//! [`PropertyError::MissingRequired`]. Malformed optional values fall back to
//! their defaults.
//!
//! # Stable Public API
//!
//! - [`PropertyStore`], [`BuildFamily`], [`PropertyKeys`]
//! - [`EntrySource`], [`ArchiveEntry`], [`ZipStream`]
//! - [`TestPropsError`], [`PropertyError`]
//! - [`keys`] - property names, alias lists, and defaults
//! - [`init_tracing`] - logging setup for embedding binaries

pub use testprops_config::{
    ArchiveEntry, BuildFamily, EntrySource, PropertyKeys, PropertyStore, ZipStream, keys, parser,
};
pub use testprops_utils::error::{ErrorCategory, PropertyError, TestPropsError, UserFriendlyError};
pub use testprops_utils::file_names::trim_source_file_name;
pub use testprops_utils::logging::init_tracing;
