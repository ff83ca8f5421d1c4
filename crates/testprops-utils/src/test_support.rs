//! Fixture helpers shared by unit and integration tests.

use std::fs;
use std::io::{self, Cursor, Write};
use std::path::{Path, PathBuf};

/// A single archive member for [`tar_archive_bytes`] and [`zip_archive_bytes`].
#[derive(Debug, Clone, Copy)]
pub enum Member<'a> {
    /// Directory entry with no content.
    Dir(&'a str),
    /// Regular file with the given content.
    File(&'a str, &'a str),
}

/// Write `content` to `dir/name` and return the full path.
pub fn write_properties_file(dir: &Path, name: &str, content: &str) -> io::Result<PathBuf> {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, content)?;
    Ok(path)
}

/// Build an uncompressed tar archive in memory, members in the given order.
pub fn tar_archive_bytes(members: &[Member<'_>]) -> io::Result<Vec<u8>> {
    let mut builder = tar::Builder::new(Vec::new());

    for member in members {
        let mut header = tar::Header::new_gnu();
        match member {
            Member::Dir(name) => {
                header.set_entry_type(tar::EntryType::Directory);
                header.set_mode(0o755);
                header.set_size(0);
                builder.append_data(&mut header, name, io::empty())?;
            }
            Member::File(name, content) => {
                header.set_entry_type(tar::EntryType::Regular);
                header.set_mode(0o644);
                header.set_size(content.len() as u64);
                builder.append_data(&mut header, name, content.as_bytes())?;
            }
        }
    }

    builder.into_inner()
}

/// Build a deflate-compressed zip archive in memory, members in the given order.
pub fn zip_archive_bytes(members: &[Member<'_>]) -> io::Result<Vec<u8>> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated);

    for member in members {
        match member {
            Member::Dir(name) => writer.add_directory(*name, options)?,
            Member::File(name, content) => {
                writer.start_file(*name, options)?;
                writer.write_all(content.as_bytes())?;
            }
        }
    }

    Ok(writer.finish()?.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tar_archive_preserves_member_order() {
        let bytes = tar_archive_bytes(&[
            Member::Dir("a/"),
            Member::File("a/test.properties", "build.language=c\n"),
            Member::File("b/ignore.txt", "x"),
        ])
        .unwrap();

        let mut archive = tar::Archive::new(bytes.as_slice());
        let names: Vec<(String, bool)> = archive
            .entries()
            .unwrap()
            .map(|e| {
                let e = e.unwrap();
                (
                    e.path().unwrap().to_string_lossy().into_owned(),
                    e.header().entry_type().is_dir(),
                )
            })
            .collect();

        assert_eq!(names.len(), 3);
        assert!(names[0].1);
        assert_eq!(names[1], ("a/test.properties".to_string(), false));
        assert_eq!(names[2], ("b/ignore.txt".to_string(), false));
    }

    #[test]
    fn test_zip_archive_marks_directories() {
        let bytes = zip_archive_bytes(&[
            Member::Dir("a/"),
            Member::File("a/test.properties", "build.language=c\n"),
        ])
        .unwrap();

        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 2);
        assert!(archive.by_index(0).unwrap().is_dir());

        let mut file = archive.by_name("a/test.properties").unwrap();
        let mut body = String::new();
        io::Read::read_to_string(&mut file, &mut body).unwrap();
        assert_eq!(body, "build.language=c\n");
    }

    #[test]
    fn test_write_properties_file_creates_parents() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = write_properties_file(dir.path(), "nested/test.properties", "k=v").unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "k=v");
    }
}
