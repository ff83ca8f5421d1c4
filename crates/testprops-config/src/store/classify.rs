use testprops_utils::file_names::trim_source_file_name;

use super::PropertyStore;

impl PropertyStore {
    /// Whether a submitted file counts as source for grading.
    ///
    /// A file is source when its raw name equals the configured student
    /// makefile or makefile name, or when the extension of its simple name is
    /// listed in the additional source file extensions (split on spaces and
    /// commas). Makefile names are matched against the undecorated raw name,
    /// extensions against the trimmed simple name.
    #[must_use]
    pub fn is_source_file(&self, name: &str) -> bool {
        let simple_name = trim_source_file_name(name);

        if self.student_makefile_name.as_deref() == Some(name)
            || self.makefile_name.as_deref() == Some(name)
        {
            return true;
        }

        let Some(extensions) = self.additional_source_file_extensions.as_deref() else {
            return false;
        };

        match simple_name.rfind('.') {
            Some(dot) if dot > 0 => {
                let suffix = &simple_name[dot + 1..];
                extensions
                    .split([' ', ','])
                    .filter(|ext| !ext.is_empty())
                    .any(|ext| ext == suffix)
            }
            _ => false,
        }
    }
}
