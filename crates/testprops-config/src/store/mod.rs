//! The test property store.
//!
//! A [`PropertyStore`] holds the raw `key -> value` map read from a
//! `test.properties` descriptor together with typed fields derived from it at
//! load time. The typed setters keep both views in sync: each one updates its
//! field and writes the serialized value back under the field's primary key.

mod classify;
mod loading;
mod lookup;

pub use lookup::PropertyKeys;

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Serialize;
use testprops_utils::error::PropertyError;

use crate::keys;

/// How a submission is built, decided by its language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display, strum::IntoStaticStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BuildFamily {
    /// Compiled with a Java toolchain; honours classpath and source version.
    Java,
    /// Every other language: built by running a make-like command.
    Makefile,
}

/// Loaded test properties for one build-and-test job.
///
/// Construct empty with [`PropertyStore::new`], then call exactly one of the
/// `load_*` methods (or use [`PropertyStore::from_path`]). Before a load the
/// typed accessors return zero, `false`, or `None`; [`language`](Self::language)
/// reports [`PropertyError::LanguageNotSet`] instead.
///
/// # Example
///
/// ```rust
/// use testprops_config::PropertyStore;
///
/// let mut store = PropertyStore::new();
/// store.load_reader("build.language=C\nbuild.make.file=Makefile.test\n".as_bytes())?;
///
/// assert_eq!(store.language()?, "c");
/// assert!(store.is_makefile_based()?);
/// assert_eq!(store.make_command(), Some("make"));
/// assert!(store.is_source_file("Makefile.test"));
/// # Ok::<(), testprops_utils::error::TestPropsError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PropertyStore {
    properties: BTreeMap<String, String>,

    // Shared
    language: Option<String>,
    test_timeout_in_seconds: i32,
    build_timeout_in_seconds: i32,
    max_drain_output_in_bytes: i32,
    ld_library_path: Option<String>,
    additional_source_file_extensions: Option<String>,

    // Java only
    perform_code_coverage: bool,
    java_source_version: Option<String>,
    test_runner_in_testfile_dir: bool,
    vm_args: Option<String>,

    // Makefile-based only
    make_command: Option<String>,
    makefile_name: Option<String>,
    student_makefile_name: Option<String>,
}

impl PropertyStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw properties, including values written back by typed setters.
    #[must_use]
    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }

    /// Set a raw property. `None` leaves any existing value untouched.
    pub fn set_property(&mut self, key: &str, value: Option<&str>) {
        if let Some(value) = value {
            self.properties.insert(key.to_string(), value.to_string());
        }
    }

    /// Project language, lowercased.
    pub fn language(&self) -> Result<&str, PropertyError> {
        self.language.as_deref().ok_or(PropertyError::LanguageNotSet)
    }

    /// Set the language. The value is stored lowercased.
    pub fn set_language(&mut self, language: &str) {
        let language = language.to_lowercase();
        self.set_property(keys::BUILD_LANGUAGE, Some(language.as_str()));
        self.language = Some(language);
    }

    pub fn is_java(&self) -> Result<bool, PropertyError> {
        Ok(self.language()? == keys::JAVA)
    }

    /// Any language other than Java is built from a Makefile.
    pub fn is_makefile_based(&self) -> Result<bool, PropertyError> {
        Ok(!self.is_java()?)
    }

    pub fn build_family(&self) -> Result<BuildFamily, PropertyError> {
        Ok(if self.is_java()? {
            BuildFamily::Java
        } else {
            BuildFamily::Makefile
        })
    }

    /// Test class configured for a test type (`test.class.<type>`).
    ///
    /// The meaning of the value depends on the build family: a JUnit class for
    /// Java, a test target for Makefile projects.
    #[must_use]
    pub fn test_class(&self, test_type: &str) -> Option<&str> {
        self.optional_string(format!("{}{test_type}", keys::TESTCLASS_PREFIX).as_str())
    }

    /// Executable for one named test (`test.exec.<type>.<name>`).
    #[must_use]
    pub fn test_exec(&self, test_type: &str, test_name: &str) -> Option<&str> {
        self.optional_string(format!("{}{test_type}.{test_name}", keys::TESTEXEC_PREFIX).as_str())
    }

    /// Student makefile name read straight from the raw properties.
    #[must_use]
    pub fn student_make_file(&self) -> Option<&str> {
        self.optional_string(keys::STUDENT_MAKE_FILENAME)
    }

    #[must_use]
    pub fn perform_code_coverage(&self) -> bool {
        self.perform_code_coverage
    }

    pub fn set_perform_code_coverage(&mut self, perform: bool) {
        self.perform_code_coverage = perform;
        self.set_property(keys::PERFORM_CODE_COVERAGE[0], Some(perform.to_string().as_str()));
    }

    #[must_use]
    pub fn test_timeout_in_seconds(&self) -> i32 {
        self.test_timeout_in_seconds
    }

    /// Test timeout as a [`Duration`]. Negative values clamp to zero.
    #[must_use]
    pub fn test_timeout(&self) -> Duration {
        seconds(self.test_timeout_in_seconds)
    }

    pub fn set_test_timeout_in_seconds(&mut self, seconds: i32) {
        self.test_timeout_in_seconds = seconds;
        self.set_property(keys::TEST_TIMEOUT[0], Some(seconds.to_string().as_str()));
    }

    #[must_use]
    pub fn build_timeout_in_seconds(&self) -> i32 {
        self.build_timeout_in_seconds
    }

    #[must_use]
    pub fn build_timeout(&self) -> Duration {
        seconds(self.build_timeout_in_seconds)
    }

    pub fn set_build_timeout_in_seconds(&mut self, seconds: i32) {
        self.build_timeout_in_seconds = seconds;
        self.set_property(keys::BUILD_TIMEOUT[0], Some(seconds.to_string().as_str()));
    }

    /// Maximum number of bytes of process output kept for review.
    #[must_use]
    pub fn max_drain_output_in_bytes(&self) -> i32 {
        self.max_drain_output_in_bytes
    }

    pub fn set_max_drain_output_in_bytes(&mut self, bytes: i32) {
        self.max_drain_output_in_bytes = bytes;
        self.set_property(keys::MAX_DRAIN_OUTPUT_IN_BYTES[0], Some(bytes.to_string().as_str()));
    }

    #[must_use]
    pub fn java_source_version(&self) -> Option<&str> {
        self.java_source_version.as_deref()
    }

    pub fn set_java_source_version(&mut self, version: Option<String>) {
        self.set_property(keys::SOURCE_VERSION[0], version.as_deref());
        self.java_source_version = version;
    }

    #[must_use]
    pub fn test_runner_in_testfile_dir(&self) -> bool {
        self.test_runner_in_testfile_dir
    }

    pub fn set_test_runner_in_testfile_dir(&mut self, in_testfile_dir: bool) {
        self.test_runner_in_testfile_dir = in_testfile_dir;
        self.set_property(keys::RUN_IN_TESTFILES_DIR[0], Some(in_testfile_dir.to_string().as_str()));
    }

    #[must_use]
    pub fn ld_library_path(&self) -> Option<&str> {
        self.ld_library_path.as_deref()
    }

    pub fn set_ld_library_path(&mut self, path: Option<String>) {
        self.set_property(keys::LD_LIBRARY_PATH, path.as_deref());
        self.ld_library_path = path;
    }

    #[must_use]
    pub fn vm_args(&self) -> Option<&str> {
        self.vm_args.as_deref()
    }

    pub fn set_vm_args(&mut self, args: Option<String>) {
        self.set_property(keys::VM_ARGS, args.as_deref());
        self.vm_args = args;
    }

    #[must_use]
    pub fn additional_source_file_extensions(&self) -> Option<&str> {
        self.additional_source_file_extensions.as_deref()
    }

    pub fn set_additional_source_file_extensions(&mut self, extensions: Option<String>) {
        self.set_property(keys::ADDITIONAL_SOURCE_FILE_EXTENSIONS, extensions.as_deref());
        self.additional_source_file_extensions = extensions;
    }

    #[must_use]
    pub fn make_command(&self) -> Option<&str> {
        self.make_command.as_deref()
    }

    pub fn set_make_command(&mut self, command: Option<String>) {
        self.set_property(keys::MAKE_COMMAND, command.as_deref());
        self.make_command = command;
    }

    #[must_use]
    pub fn makefile_name(&self) -> Option<&str> {
        self.makefile_name.as_deref()
    }

    pub fn set_makefile_name(&mut self, name: Option<String>) {
        self.set_property(keys::MAKE_FILENAME, name.as_deref());
        self.makefile_name = name;
    }

    #[must_use]
    pub fn student_makefile_name(&self) -> Option<&str> {
        self.student_makefile_name.as_deref()
    }

    pub fn set_student_makefile_name(&mut self, name: Option<String>) {
        self.set_property(keys::STUDENT_MAKE_FILENAME, name.as_deref());
        self.student_makefile_name = name;
    }
}

fn seconds(value: i32) -> Duration {
    Duration::from_secs(u64::try_from(value).unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_store_defaults() {
        let store = PropertyStore::new();
        assert_eq!(store.language(), Err(PropertyError::LanguageNotSet));
        assert_eq!(store.is_java(), Err(PropertyError::LanguageNotSet));
        assert_eq!(store.test_timeout_in_seconds(), 0);
        assert_eq!(store.build_timeout_in_seconds(), 0);
        assert_eq!(store.max_drain_output_in_bytes(), 0);
        assert!(!store.perform_code_coverage());
        assert!(!store.test_runner_in_testfile_dir());
        assert_eq!(store.java_source_version(), None);
        assert_eq!(store.make_command(), None);
        assert!(store.properties().is_empty());
    }

    #[test]
    fn test_set_language_lowercases_and_writes_back() {
        let mut store = PropertyStore::new();
        store.set_language("Java");
        assert_eq!(store.language(), Ok("java"));
        assert_eq!(store.is_java(), Ok(true));
        assert_eq!(store.is_makefile_based(), Ok(false));
        assert_eq!(store.build_family(), Ok(BuildFamily::Java));
        assert_eq!(store.properties()[keys::BUILD_LANGUAGE], "java");

        store.set_language("OCaml");
        assert_eq!(store.build_family(), Ok(BuildFamily::Makefile));
        assert_eq!(store.build_family().unwrap().to_string(), "makefile");
    }

    #[test]
    fn test_set_property_none_is_noop() {
        let mut store = PropertyStore::new();
        store.set_property("k", Some("v"));
        store.set_property("k", None);
        assert_eq!(store.properties()["k"], "v");
        store.set_property("absent", None);
        assert!(!store.properties().contains_key("absent"));
    }

    #[test]
    fn test_typed_setters_write_primary_key() {
        let mut store = PropertyStore::new();
        store.set_test_timeout_in_seconds(42);
        store.set_build_timeout_in_seconds(99);
        store.set_max_drain_output_in_bytes(4096);
        store.set_perform_code_coverage(true);
        store.set_test_runner_in_testfile_dir(false);
        store.set_java_source_version(Some("11".to_string()));

        let props = store.properties();
        assert_eq!(props[keys::TEST_TIMEOUT[0]], "42");
        assert_eq!(props[keys::BUILD_TIMEOUT[0]], "99");
        assert_eq!(props[keys::MAX_DRAIN_OUTPUT_IN_BYTES[0]], "4096");
        assert_eq!(props[keys::PERFORM_CODE_COVERAGE[0]], "true");
        assert_eq!(props[keys::RUN_IN_TESTFILES_DIR[0]], "false");
        assert_eq!(props[keys::SOURCE_VERSION[0]], "11");
        assert_eq!(store.test_timeout(), Duration::from_secs(42));
        assert_eq!(store.build_timeout(), Duration::from_secs(99));
    }

    #[test]
    fn test_negative_timeout_is_stored_and_clamped_as_duration() {
        let mut store = PropertyStore::new();
        store.set_test_timeout_in_seconds(-1);
        assert_eq!(store.test_timeout_in_seconds(), -1);
        assert_eq!(store.properties()[keys::TEST_TIMEOUT[0]], "-1");
        assert_eq!(store.test_timeout(), Duration::ZERO);
    }

    #[test]
    fn test_clearing_optional_field_keeps_raw_value() {
        let mut store = PropertyStore::new();
        store.set_vm_args(Some("-ea".to_string()));
        store.set_vm_args(None);
        assert_eq!(store.vm_args(), None);
        assert_eq!(store.properties()[keys::VM_ARGS], "-ea");
    }

    #[test]
    fn test_test_class_and_exec_lookups() {
        let mut store = PropertyStore::new();
        store.set_property("test.class.public", Some("PublicTests"));
        store.set_property("test.exec.release.sort", Some("./run_sort"));

        assert_eq!(store.test_class("public"), Some("PublicTests"));
        assert_eq!(store.test_class("secret"), None);
        assert_eq!(store.test_exec("release", "sort"), Some("./run_sort"));
        assert_eq!(store.test_exec("release", "merge"), None);
    }

    #[test]
    fn test_student_make_file_reads_raw_map() {
        let mut store = PropertyStore::new();
        store.set_property(keys::STUDENT_MAKE_FILENAME, Some("Makefile.student"));
        assert_eq!(store.student_make_file(), Some("Makefile.student"));
        assert_eq!(store.student_makefile_name(), None);
    }
}
