//! Archives as a sequence of named byte streams.
//!
//! The store only needs to walk entries in stored order and read the ones it
//! wants, so any archive format can plug in through [`EntrySource`]. Tar
//! archives (plain or wrapped in a gzip decoder) and zip or jar streams are
//! supported out of the box.

use std::io::Read;

use testprops_utils::error::TestPropsError;

use crate::keys::TEST_PROPERTIES_SUFFIX;

/// One archive member handed to an [`EntrySource`] visitor.
pub struct ArchiveEntry<'a> {
    pub name: String,
    pub is_dir: bool,
    /// Content of this member only; reading past it yields EOF.
    pub content: &'a mut dyn Read,
}

impl ArchiveEntry<'_> {
    /// True for non-directory entries whose name ends in `test.properties`.
    #[must_use]
    pub fn is_test_properties(&self) -> bool {
        !self.is_dir && self.name.ends_with(TEST_PROPERTIES_SUFFIX)
    }
}

/// A streaming archive reader.
pub trait EntrySource {
    /// Call `visit` once per entry, in stored order. Stops at the first error
    /// returned by either the archive or the visitor.
    fn visit_entries(
        &mut self,
        visit: &mut dyn FnMut(ArchiveEntry<'_>) -> Result<(), TestPropsError>,
    ) -> Result<(), TestPropsError>;
}

impl<R: Read> EntrySource for tar::Archive<R> {
    fn visit_entries(
        &mut self,
        visit: &mut dyn FnMut(ArchiveEntry<'_>) -> Result<(), TestPropsError>,
    ) -> Result<(), TestPropsError> {
        for entry in self.entries()? {
            let mut entry = entry?;
            let name = entry.path()?.to_string_lossy().into_owned();
            let is_dir = entry.header().entry_type().is_dir();
            visit(ArchiveEntry {
                name,
                is_dir,
                content: &mut entry,
            })?;
        }
        Ok(())
    }
}

/// A zip or jar archive read front to back, without seeking.
///
/// Entries are discovered from their local headers, so the central directory
/// at the end of the archive is never consulted.
pub struct ZipStream<R> {
    reader: R,
}

impl<R: Read> ZipStream<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: Read> EntrySource for ZipStream<R> {
    fn visit_entries(
        &mut self,
        visit: &mut dyn FnMut(ArchiveEntry<'_>) -> Result<(), TestPropsError>,
    ) -> Result<(), TestPropsError> {
        while let Some(mut file) =
            zip::read::read_zipfile_from_stream(&mut self.reader).map_err(std::io::Error::from)?
        {
            let name = file.name().to_string();
            let is_dir = file.is_dir();
            visit(ArchiveEntry {
                name,
                is_dir,
                content: &mut file,
            })?;
        }
        Ok(())
    }
}
