use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use flate2::read::GzDecoder;
use testprops_utils::error::{PropertyError, TestPropsError};
use tracing::{debug, trace, warn};

use super::PropertyStore;
use crate::archive::{EntrySource, ZipStream};
use crate::keys::{self, DEFAULT_BUILD_TIMEOUT, DEFAULT_PROCESS_TIMEOUT};
use crate::parser::{Property, read_properties};

impl PropertyStore {
    /// Load a store from a `test.properties` file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TestPropsError> {
        let mut store = Self::new();
        store.load_path(path)?;
        Ok(store)
    }

    /// Load properties from a file on disk.
    ///
    /// # Errors
    ///
    /// [`TestPropsError::Load`] if the file cannot be opened or read,
    /// [`PropertyError::MissingRequired`] if it does not name a language.
    pub fn load_path(&mut self, path: impl AsRef<Path>) -> Result<(), TestPropsError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading test properties");

        let file = File::open(path).map_err(|e| TestPropsError::load(path, e))?;
        let properties = read_properties(BufReader::new(file)).map_err(|e| match e {
            TestPropsError::Io(source) => TestPropsError::load(path, source),
            other => other,
        })?;
        self.initialize(properties)
    }

    /// Load properties from an open byte stream, read to the end.
    pub fn load_reader<R: Read>(&mut self, reader: R) -> Result<(), TestPropsError> {
        debug!("Loading test properties from stream");
        let properties = read_properties(reader)?;
        self.initialize(properties)
    }

    /// Load every non-directory entry whose name ends in `test.properties`.
    ///
    /// Each matching entry is parsed into the same map and triggers a fresh
    /// derivation, so later entries override earlier ones. An archive without
    /// a matching entry leaves the store empty and is not an error here.
    pub fn load_entries<S: EntrySource + ?Sized>(&mut self, source: &mut S) -> Result<(), TestPropsError> {
        let mut matched = 0usize;

        source.visit_entries(&mut |entry| {
            if !entry.is_test_properties() {
                trace!(entry = %entry.name, is_dir = entry.is_dir, "Skipping archive entry");
                return Ok(());
            }

            matched += 1;
            if matched > 1 {
                warn!(entry = %entry.name, "Additional test.properties entry overrides earlier values");
            } else {
                debug!(entry = %entry.name, "Loading test properties from archive entry");
            }

            let properties = read_properties(entry.content)?;
            self.initialize(properties)
        })?;

        if matched == 0 {
            debug!("Archive contains no test.properties entry");
        }
        Ok(())
    }

    /// Load from an uncompressed tar stream.
    pub fn load_tar<R: Read>(&mut self, reader: R) -> Result<(), TestPropsError> {
        let mut archive = tar::Archive::new(reader);
        self.load_entries(&mut archive)
    }

    /// Load from a gzip-compressed tar stream.
    pub fn load_tar_gz<R: Read>(&mut self, reader: R) -> Result<(), TestPropsError> {
        self.load_tar(GzDecoder::new(reader))
    }

    /// Load from a zip or jar stream, such as a project's test setup jar.
    pub fn load_zip<R: Read>(&mut self, reader: R) -> Result<(), TestPropsError> {
        self.load_entries(&mut ZipStream::new(reader))
    }

    fn initialize(&mut self, properties: Vec<Property>) -> Result<(), TestPropsError> {
        debug!(count = properties.len(), "Parsed test properties");
        // A name from an alias list replaces whatever an earlier load stored
        // under any of its spellings, including derived write-backs.
        for aliases in keys::ALIAS_LISTS {
            if properties.iter().any(|(key, _)| aliases.contains(&key.as_str())) {
                for alias in *aliases {
                    self.properties.remove(*alias);
                }
            }
        }
        self.properties.extend(properties);
        self.derive()?;
        Ok(())
    }

    /// Resolve every typed field from the raw map. The language comes first
    /// and is the only mandatory field.
    fn derive(&mut self) -> Result<(), PropertyError> {
        let language = self.required_string(keys::BUILD_LANGUAGE)?;
        if language.trim().is_empty() {
            return Err(PropertyError::MissingRequired {
                key: keys::BUILD_LANGUAGE.to_string(),
            });
        }
        let language = language.to_string();
        self.set_language(&language);

        let coverage = self.optional_boolean(keys::PERFORM_CODE_COVERAGE, false);
        self.set_perform_code_coverage(coverage);

        let max_drain = self.optional_integer(
            keys::MAX_DRAIN_OUTPUT_IN_BYTES,
            keys::DEFAULT_MAX_DRAIN_OUTPUT_IN_BYTES,
        );
        self.set_max_drain_output_in_bytes(max_drain);

        let source_version = self
            .optional_string_or(keys::SOURCE_VERSION, keys::DEFAULT_JAVA_SOURCE_VERSION)
            .to_string();
        self.set_java_source_version(Some(source_version));

        let in_testfile_dir = self.optional_boolean(keys::RUN_IN_TESTFILES_DIR, false);
        self.set_test_runner_in_testfile_dir(in_testfile_dir);

        let ld_library_path = self.optional_owned(keys::LD_LIBRARY_PATH);
        self.set_ld_library_path(ld_library_path);

        let vm_args = self.optional_owned(keys::VM_ARGS);
        self.set_vm_args(vm_args);

        let extensions = self.optional_owned(keys::ADDITIONAL_SOURCE_FILE_EXTENSIONS);
        self.set_additional_source_file_extensions(extensions);

        let make_command = self
            .optional_string_or(keys::MAKE_COMMAND, keys::DEFAULT_MAKE_COMMAND)
            .to_string();
        self.set_make_command(Some(make_command));

        let makefile = self.optional_owned(keys::MAKE_FILENAME);
        self.set_makefile_name(makefile);

        let student_makefile = self.optional_owned(keys::STUDENT_MAKE_FILENAME);
        self.set_student_makefile_name(student_makefile);

        let test_timeout = self.optional_integer(keys::TEST_TIMEOUT, DEFAULT_PROCESS_TIMEOUT);
        self.set_test_timeout_in_seconds(test_timeout);

        let build_timeout = self.optional_integer(keys::BUILD_TIMEOUT, DEFAULT_BUILD_TIMEOUT);
        self.set_build_timeout_in_seconds(build_timeout);

        debug!(
            language = %language,
            test_timeout,
            build_timeout,
            "Derived test properties"
        );
        Ok(())
    }

    fn optional_owned(&self, key: &str) -> Option<String> {
        self.optional_string(key).map(str::to_owned)
    }
}
