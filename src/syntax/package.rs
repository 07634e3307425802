//! Package declarations and the relation between two packages.

use smol_str::SmolStr;
use std::fmt;

use crate::base::constants::NAME_SEPARATOR;

/// A dotted package name, e.g. `google.protobuf`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Package {
    name: SmolStr,
}

impl Package {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Dotted segments, skipping empty ones (`a..b` is read as `a.b`).
    pub fn segments(&self) -> impl Iterator<Item = &str> + '_ {
        self.name.split(NAME_SEPARATOR).filter(|s| !s.is_empty())
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Decide whether two packages are related.
///
/// Related packages are equal, or one's segments are a prefix of the
/// other's (`a.b` and `a.b.c`). A missing declaration is the root namespace,
/// which is related to everything.
pub fn are_related(a: Option<&Package>, b: Option<&Package>) -> bool {
    let (Some(a), Some(b)) = (a, b) else {
        return true;
    };
    let mut left = a.segments();
    let mut right = b.segments();
    loop {
        match (left.next(), right.next()) {
            (Some(x), Some(y)) if x == y => continue,
            (Some(_), Some(_)) => return false,
            // one side ran out first: it is a prefix of the other
            _ => return true,
        }
    }
}

/// Number of leading segments two packages share.
pub fn common_prefix_len(a: &Package, b: &Package) -> usize {
    a.segments()
        .zip(b.segments())
        .take_while(|(x, y)| x == y)
        .count()
}
