//! Property key names, alias lists, and defaults.
//!
//! Fields that were renamed over time carry an ordered alias list: lookups
//! try each name in order and the first one present wins. Typed setters
//! always write back under the first name of the list.

/// Language value that selects the Java build family.
pub const JAVA: &str = "java";

/// Project source language. Mandatory.
pub const BUILD_LANGUAGE: &str = "build.language";

/// Whether to collect code coverage while running tests.
pub const PERFORM_CODE_COVERAGE: &[&str] = &["performCodeCoverage", "test.performCodeCoverage"];

/// Cap on retained process output, in bytes.
pub const MAX_DRAIN_OUTPUT_IN_BYTES: &[&str] = &["test.output.maxBytes", "test.maxDrainOutputInBytes"];

/// Java `-source` level.
pub const SOURCE_VERSION: &[&str] = &["build.sourceVersion", "build.source.version"];

/// Run the test runner from inside the test files directory.
pub const RUN_IN_TESTFILES_DIR: &[&str] = &["test.runInTestfileDir", "test.runner.inTestfileDir"];

pub const LD_LIBRARY_PATH: &str = "test.ld_library_path";

pub const VM_ARGS: &str = "test.vmargs";

/// Space- or comma-separated extensions counted as source in addition to the
/// language defaults.
pub const ADDITIONAL_SOURCE_FILE_EXTENSIONS: &str = "build.additionalSourceFileExtensions";

pub const MAKE_COMMAND: &str = "build.make.command";

pub const MAKE_FILENAME: &str = "build.make.file";

pub const STUDENT_MAKE_FILENAME: &str = "build.student.make.file";

/// Per-test-case timeout, in seconds.
pub const TEST_TIMEOUT: &[&str] = &["test.timeout.testCase", "test.timeout"];

/// Build step timeout, in seconds.
pub const BUILD_TIMEOUT: &[&str] = &["build.timeout", "build.timeout.seconds"];

/// Prefix for `test.class.<test type>` keys.
pub const TESTCLASS_PREFIX: &str = "test.class.";

/// Prefix for `test.exec.<test type>.<test name>` keys.
pub const TESTEXEC_PREFIX: &str = "test.exec.";

/// Archive entries whose name ends with this suffix are loaded.
pub const TEST_PROPERTIES_SUFFIX: &str = "test.properties";

/// Every alias list above. A descriptor that sets any name of a list
/// replaces the values held under all of its names.
pub const ALIAS_LISTS: &[&[&str]] = &[
    PERFORM_CODE_COVERAGE,
    MAX_DRAIN_OUTPUT_IN_BYTES,
    SOURCE_VERSION,
    RUN_IN_TESTFILES_DIR,
    TEST_TIMEOUT,
    BUILD_TIMEOUT,
];

pub const DEFAULT_PROCESS_TIMEOUT: i32 = 30;

/// Build steps get six test-timeout units by default.
pub const DEFAULT_BUILD_TIMEOUT: i32 = 6 * DEFAULT_PROCESS_TIMEOUT;

pub const DEFAULT_MAX_DRAIN_OUTPUT_IN_BYTES: i32 = 1_000_000;

pub const DEFAULT_JAVA_SOURCE_VERSION: &str = "1.5";

pub const DEFAULT_MAKE_COMMAND: &str = "make";
