//! URL path canonicalization used at comparison time.

/// Canonicalize a URL path.
///
/// The result starts with `/`, never contains `//`, and has no trailing `/`
/// unless it is exactly `/`. Leading and trailing whitespace is dropped.
pub fn normalize_path(input: &str) -> String {
    let mut result = String::with_capacity(input.len() + 1);
    result.push('/');

    for c in input.trim().chars() {
        if c == '/' && result.ends_with('/') {
            continue;
        }
        result.push(c);
    }

    while result.len() > 1 && result.ends_with(|c: char| c == '/' || c.is_whitespace()) {
        result.pop();
    }
    result
}

/// Split a path into its non-empty segments after normalization.
pub fn segments(path: &str) -> Vec<String> {
    normalize_path(path)
        .split('/')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
