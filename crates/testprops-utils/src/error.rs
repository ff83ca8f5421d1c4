use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Library-level error type for test property loading.
///
/// `TestPropsError` is returned by every fallible `load` entry point. It
/// separates I/O failures (the descriptor could not be read) from property
/// failures (the descriptor was read but is unusable).
///
/// # Error Categories
///
/// | Category | Description |
/// |----------|-------------|
/// | `Io` | Stream or archive read failure |
/// | `Load` | A named file could not be opened or read |
/// | `Property` | Mandatory property missing, malformed escape, language unset |
///
/// Malformed optional values (for example a non-numeric timeout) are never
/// reported here; they resolve to their defaults.
///
/// # Example
///
/// ```rust
/// use testprops_utils::error::{PropertyError, TestPropsError};
///
/// fn report(err: &TestPropsError) {
///     eprintln!("{}", err.display_for_user());
/// }
///
/// let err = TestPropsError::from(PropertyError::MissingRequired {
///     key: "build.language".to_string(),
/// });
/// assert!(err.is_missing_required());
/// report(&err);
/// ```
#[derive(Error, Debug)]
pub enum TestPropsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Property(#[from] PropertyError),
}

impl TestPropsError {
    /// Wrap an I/O error with the path that produced it.
    pub fn load(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Load {
            path: path.into(),
            source,
        }
    }

    /// True when the failure is a missing mandatory property.
    #[must_use]
    pub fn is_missing_required(&self) -> bool {
        matches!(self, Self::Property(PropertyError::MissingRequired { .. }))
    }

    /// Key named by a missing-required failure, if this is one.
    #[must_use]
    pub fn missing_key(&self) -> Option<&str> {
        match self {
            Self::Property(PropertyError::MissingRequired { key }) => Some(key.as_str()),
            _ => None,
        }
    }

    /// Render the error with context and suggestions for a human reader.
    #[must_use]
    pub fn display_for_user(&self) -> String {
        let mut out = format!("[{}] {}", self.category(), self.user_message());
        if let Some(context) = self.context() {
            out.push_str("\n  ");
            out.push_str(&context);
        }
        for suggestion in self.suggestions() {
            out.push_str("\n  - ");
            out.push_str(&suggestion);
        }
        out
    }
}

/// Failures tied to the content of a test properties descriptor.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PropertyError {
    #[error("test.properties is missing required property {key}")]
    MissingRequired { key: String },

    #[error("build language has not been set; load test.properties first")]
    LanguageNotSet,

    #[error("Malformed \\uXXXX escape on line {line}")]
    MalformedEscape { line: usize },
}

/// Trait for providing user-friendly error reporting with context and suggestions
pub trait UserFriendlyError {
    /// Get a user-friendly error message
    fn user_message(&self) -> String;

    /// Get contextual information about the error
    fn context(&self) -> Option<String>;

    /// Get suggested actions to resolve the error
    fn suggestions(&self) -> Vec<String>;

    /// Get the error category for grouping similar errors
    fn category(&self) -> ErrorCategory;
}

/// Categories of errors for better organization and handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    FileSystem,
    Usage,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration => write!(f, "Configuration"),
            Self::FileSystem => write!(f, "File System"),
            Self::Usage => write!(f, "Usage"),
        }
    }
}

impl UserFriendlyError for PropertyError {
    fn user_message(&self) -> String {
        match self {
            Self::MissingRequired { key } => {
                format!("Required test property '{key}' is missing")
            }
            Self::LanguageNotSet => "The build language was read before it was set".to_string(),
            Self::MalformedEscape { line } => {
                format!("Invalid unicode escape in test.properties on line {line}")
            }
        }
    }

    fn context(&self) -> Option<String> {
        match self {
            Self::MissingRequired { .. } => Some(
                "A test.properties file must name the project language before a build can run."
                    .to_string(),
            ),
            Self::LanguageNotSet => None,
            Self::MalformedEscape { .. } => Some(
                "A backslash-u escape must be followed by exactly four hexadecimal digits."
                    .to_string(),
            ),
        }
    }

    fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MissingRequired { key } => vec![
                format!("Add a line such as '{key}=java' to test.properties"),
                "Check that the archive contains a file ending in test.properties".to_string(),
            ],
            Self::LanguageNotSet => {
                vec!["Call one of the load methods or set_language before querying".to_string()]
            }
            Self::MalformedEscape { .. } => vec![
                "Escape a literal backslash as '\\\\'".to_string(),
                "Save the file as UTF-8 and write the character directly".to_string(),
            ],
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingRequired { .. } | Self::MalformedEscape { .. } => {
                ErrorCategory::Configuration
            }
            Self::LanguageNotSet => ErrorCategory::Usage,
        }
    }
}

impl UserFriendlyError for TestPropsError {
    fn user_message(&self) -> String {
        match self {
            Self::Io(e) => format!("Failed to read test properties: {e}"),
            Self::Load { path, source } => {
                format!("Could not read '{}': {source}", path.display())
            }
            Self::Property(e) => e.user_message(),
        }
    }

    fn context(&self) -> Option<String> {
        match self {
            Self::Io(_) => None,
            Self::Load { source, .. } if source.kind() == std::io::ErrorKind::NotFound => {
                Some("The test properties file does not exist.".to_string())
            }
            Self::Load { .. } => None,
            Self::Property(e) => e.context(),
        }
    }

    fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Io(_) => vec!["Check that the archive is complete and not corrupted".to_string()],
            Self::Load { .. } => vec![
                "Check the path and its read permissions".to_string(),
            ],
            Self::Property(e) => e.suggestions(),
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Io(_) | Self::Load { .. } => ErrorCategory::FileSystem,
            Self::Property(e) => e.category(),
        }
    }
}
