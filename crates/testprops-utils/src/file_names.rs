//! File name normalization for submitted source files.

/// Suffixes added by version control and editors that hide a file's real name.
const DECORATION_SUFFIXES: &[&str] = &[",v", "~"];

/// Reduce a submitted file name to its simple name.
///
/// Leading directories (either separator) are removed, then RCS `,v` and
/// editor backup `~` suffixes are stripped. The result may be empty when the
/// input names a directory.
///
/// ```rust
/// use testprops_utils::file_names::trim_source_file_name;
///
/// assert_eq!(trim_source_file_name("src/main/Foo.java"), "Foo.java");
/// assert_eq!(trim_source_file_name("RCS/list.c,v"), "list.c");
/// ```
#[must_use]
pub fn trim_source_file_name(name: &str) -> &str {
    let mut simple = match name.rfind(['/', '\\']) {
        Some(idx) => &name[idx + 1..],
        None => name,
    };

    while let Some(stripped) = DECORATION_SUFFIXES
        .iter()
        .find_map(|suffix| simple.strip_suffix(suffix))
    {
        simple = stripped;
    }

    simple
}
