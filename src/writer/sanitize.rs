//! Filename-safe rendering of resource identity fields.

/// Replace every character outside `[A-Za-z0-9.-]` with `_`.
///
/// The result never contains a path separator, so one identity field always
/// renders to at most one path segment. Dots are kept (`v1.2`, `kube-system.x`);
/// a value of exactly `..` is rejected later by the writer's path check rather
/// than rewritten here.
///
/// Sanitizing is idempotent: `sanitize(&sanitize(s)) == sanitize(s)`.
///
/// # Examples
///
/// ```rust
/// use kubectl_save::writer::sanitize;
///
/// assert_eq!(sanitize("apps/v1"), "apps_v1");
/// assert_eq!(sanitize("my-app.v2"), "my-app.v2");
/// ```
pub fn sanitize(segment: &str) -> String {
    segment.chars().map(|c| if is_allowed(c) { c } else { '_' }).collect()
}

fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '.'
}
