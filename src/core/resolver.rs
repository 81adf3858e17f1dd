//! Raw reference resolution.
//!
//! Turns the raw strings the extractors produce into canonical
//! root-relative paths, or rejects them when they can never be a local
//! edge (external URLs, data URIs, fragment-only links).

/// Resolves a raw reference against its source file's canonical path.
///
/// Returns `None` when the reference is excluded: scheme-prefixed URLs
/// (`http:`, `https:`, `data:`, `mailto:`, ...), protocol-relative `//`
/// URLs, and references that are empty once the query string and fragment
/// are stripped. The result is always `/`-prefixed with forward slashes
/// and no remaining `.`/`..` segments.
pub fn normalize(raw: &str, source_path: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() || is_external(raw) {
        return None;
    }

    let stripped = strip_query_and_fragment(raw);
    if stripped.is_empty() {
        return None;
    }
    let stripped = stripped.replace('\\', "/");

    let joined = if stripped.starts_with('/') {
        stripped
    } else {
        format!("{}/{}", parent_dir(source_path), stripped)
    };

    let canonical = reduce_segments(&joined);
    if canonical == "/" {
        return None;
    }
    Some(canonical)
}

/// True for references that never become graph edges: protocol-relative
/// URLs and anything carrying a URI scheme.
pub fn is_external(raw: &str) -> bool {
    if raw.starts_with("//") {
        return true;
    }
    has_scheme(raw)
}

// RFC 3986 scheme: ALPHA *( ALPHA / DIGIT / "+" / "-" / "." ) ":",
// appearing before any path/query/fragment delimiter.
fn has_scheme(raw: &str) -> bool {
    let mut chars = raw.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    for c in chars {
        match c {
            ':' => return true,
            c if c.is_ascii_alphanumeric() || c == '+' || c == '-' || c == '.' => {}
            _ => return false,
        }
    }
    false
}

fn strip_query_and_fragment(raw: &str) -> &str {
    let end = raw.find(['?', '#']).unwrap_or(raw.len());
    &raw[..end]
}

/// Containing directory of a canonical path, without trailing slash.
/// `/a/b.html` -> `/a`; `/index.html` -> ``.
fn parent_dir(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[..idx],
        None => "",
    }
}

/// Collapses `.` and `..` segments. `..` at the root is clamped rather
/// than escaping the project tree.
fn reduce_segments(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    let mut out = String::with_capacity(path.len());
    for segment in &segments {
        out.push('/');
        out.push_str(segment);
    }
    if out.is_empty() {
        out.push('/');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_references_pass_through() {
        assert_eq!(
            normalize("/js/app.js", "/index.html"),
            Some("/js/app.js".to_string())
        );
    }

    #[test]
    fn relative_references_resolve_against_source_dir() {
        assert_eq!(
            normalize("./util.js", "/js/app.js"),
            Some("/js/util.js".to_string())
        );
        assert_eq!(
            normalize("../css/site.css", "/js/app.js"),
            Some("/css/site.css".to_string())
        );
        assert_eq!(
            normalize("partials/nav.html", "/pages/about.html"),
            Some("/pages/partials/nav.html".to_string())
        );
    }

    #[test]
    fn query_and_fragment_are_stripped() {
        assert_eq!(
            normalize("/app.js?v=3", "/index.html"),
            Some("/app.js".to_string())
        );
        assert_eq!(
            normalize("page.html#section", "/index.html"),
            Some("/page.html".to_string())
        );
        assert_eq!(normalize("#top", "/index.html"), None);
    }

    #[test]
    fn external_references_are_excluded() {
        assert_eq!(normalize("https://cdn.example.com/lib.js", "/index.html"), None);
        assert_eq!(normalize("http://example.com/a.css", "/index.html"), None);
        assert_eq!(normalize("//cdn.example.com/lib.js", "/index.html"), None);
        assert_eq!(normalize("data:image/png;base64,AAAA", "/index.html"), None);
        assert_eq!(normalize("mailto:sales@example.com", "/index.html"), None);
    }

    #[test]
    fn dot_dot_clamps_at_root() {
        assert_eq!(
            normalize("../../../app.js", "/js/main.js"),
            Some("/app.js".to_string())
        );
    }
}
