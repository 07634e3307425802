//! Names under which a definition can be referenced.
//!
//! For a node `N` nested in messages/groups `C1..Ck` of a document with
//! package `p1..pm`:
//!
//! ```text
//! local names      N, Ck.N, .., C1..Ck.N, pm.C1..Ck.N, .., p1..pm.C1..Ck.N
//! qualified names  p1..pm.C1..Ck.N, .p1..pm.C1..Ck.N
//! ```
//!
//! The intersection names cover references written relative to a package
//! prefix the importer shares with the imported document.

use smol_str::SmolStr;
use std::fmt;

use crate::base::constants::NAME_SEPARATOR;
use crate::syntax::{NodeRef, Package, common_prefix_len};

/// A dotted name as written in a type reference. A leading dot marks a
/// fully-qualified (absolute) reference.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QualifiedName(SmolStr);

impl QualifiedName {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self(name.into())
    }

    pub fn from_segments<S: AsRef<str>>(segments: &[S]) -> Self {
        let mut joined = String::new();
        for (i, segment) in segments.iter().enumerate() {
            if i > 0 {
                joined.push(NAME_SEPARATOR);
            }
            joined.push_str(segment.as_ref());
        }
        Self(joined.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_absolute(&self) -> bool {
        self.0.starts_with(NAME_SEPARATOR)
    }

    /// The same name prefixed with `.`; absolute names are returned as-is.
    pub fn with_leading_dot(&self) -> Self {
        if self.is_absolute() {
            self.clone()
        } else {
            Self(format!("{NAME_SEPARATOR}{}", self.0).into())
        }
    }

    pub fn segment_count(&self) -> usize {
        self.0
            .split(NAME_SEPARATOR)
            .filter(|s| !s.is_empty())
            .count()
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0.as_str())
    }
}

impl From<&str> for QualifiedName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for QualifiedName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for QualifiedName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// `p1..pm, C1..Ck, N` for a named node; `None` for anonymous nodes.
fn full_segments<'a>(node: NodeRef<'a>, package: Option<&'a Package>) -> Option<Vec<&'a str>> {
    let name = node.name()?;
    let mut segments: Vec<&str> = package.map(|p| p.segments().collect()).unwrap_or_default();
    segments.extend(node.container_names());
    segments.push(name);
    Some(segments)
}

/// The fully-qualified name, without a leading dot.
pub fn fully_qualified_name(node: NodeRef<'_>, package: Option<&Package>) -> Option<QualifiedName> {
    full_segments(node, package).map(|s| QualifiedName::from_segments(&s))
}

/// The fully-qualified name, with and without the leading dot.
pub fn qualified_names(node: NodeRef<'_>, package: Option<&Package>) -> Vec<QualifiedName> {
    match fully_qualified_name(node, package) {
        Some(fqn) => {
            let absolute = fqn.with_leading_dot();
            vec![fqn, absolute]
        }
        None => Vec::new(),
    }
}

/// Local names, shortest first. Index `i` carries `i` enclosing segments,
/// so a node found `level` scopes below the search origin is visible under
/// the names from index `level` on.
pub fn local_names(node: NodeRef<'_>, package: Option<&Package>) -> Vec<QualifiedName> {
    let Some(segments) = full_segments(node, package) else {
        return Vec::new();
    };
    (1..=segments.len())
        .map(|take| QualifiedName::from_segments(&segments[segments.len() - take..]))
        .collect()
}

/// Names reachable through the package prefix shared by importer and imported.
///
/// With importer `a.b.x` and imported `a.b.y`, a message `y.M` is also
/// visible as `b.y.M` and `y.M`. Nothing is produced when either package is
/// missing or the packages share no leading segment.
pub fn intersection_names(
    from_importer: Option<&Package>,
    from_imported: Option<&Package>,
    node: NodeRef<'_>,
) -> Vec<QualifiedName> {
    let (Some(importer), Some(imported)) = (from_importer, from_imported) else {
        return Vec::new();
    };
    let shared = common_prefix_len(importer, imported);
    if shared == 0 {
        return Vec::new();
    }
    let Some(segments) = full_segments(node, Some(imported)) else {
        return Vec::new();
    };
    (1..=shared)
        .filter(|&skip| skip < segments.len())
        .map(|skip| QualifiedName::from_segments(&segments[skip..]))
        .collect()
}
