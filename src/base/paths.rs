//! Path utilities for document URIs.
//!
//! URIs are '/'-separated strings. They are compared textually, so every URI
//! that enters the workspace goes through [`normalize`] first.

use super::constants::PROTO_EXTENSION;

/// Normalize a document path for consistent storage and lookup.
///
/// Backslashes become '/', `.` segments and empty segments are dropped and
/// `..` pops the previous segment. A leading '/' is kept. `..` segments that
/// would climb above the start of a relative path are kept as-is.
///
/// ```
/// use protoscope::base::paths::normalize;
///
/// assert_eq!(normalize("protos/./a/../b.proto"), "protos/b.proto");
/// assert_eq!(normalize("C:\\work\\x.proto"), "C:/work/x.proto");
/// ```
pub fn normalize(path: &str) -> String {
    let path = path.replace('\\', "/");
    let absolute = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                _ if absolute => {}
                _ => segments.push(".."),
            },
            other => segments.push(other),
        }
    }

    let joined = segments.join("/");
    if absolute {
        format!("/{joined}")
    } else {
        joined
    }
}

/// The directory part of a URI, without a trailing '/'.
///
/// Returns an empty string for a bare file name.
pub fn parent_dir(uri: &str) -> &str {
    match uri.rfind('/') {
        Some(0) => "/",
        Some(idx) => &uri[..idx],
        None => "",
    }
}

/// Join a relative path onto a directory and normalize the result.
pub fn join(dir: &str, relative: &str) -> String {
    if dir.is_empty() {
        normalize(relative)
    } else {
        normalize(&format!("{dir}/{relative}"))
    }
}

/// Check whether a path names a proto document.
pub fn is_proto_file(path: &str) -> bool {
    path.rsplit_once('.')
        .is_some_and(|(_, ext)| ext.eq_ignore_ascii_case(PROTO_EXTENSION))
}
