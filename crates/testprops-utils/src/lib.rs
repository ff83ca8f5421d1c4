pub mod error;
pub mod file_names;
pub mod logging;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_support;
