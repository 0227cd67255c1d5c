//! File-name slugs for icon labels.

/// Turn a label into a file-name stem.
///
/// Spaces and slashes become `-`, the result is lowercased, and anything
/// that is neither alphanumeric nor `-` is dropped.
///
/// # Examples
///
/// - `"AI-First Architecture"` -> `"ai-first-architecture"`
/// - `"CI/CD & Ops"` -> `"ci-cd--ops"`
pub fn slugify(label: &str) -> String {
    label
        .replace([' ', '/'], "-")
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '-')
        .collect()
}
