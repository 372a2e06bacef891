//! Fixed set of dialog types the gateway will serve.

use std::collections::BTreeSet;

use crate::url_model::{validate_segment, SegmentError};

/// Immutable allow-list of dialog type identifiers. Matching is exact and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowList {
    types: BTreeSet<String>,
}

impl AllowList {
    /// Builds the list, rejecting entries that are not safe path segments.
    pub fn new<I, S>(types: I) -> Result<Self, SegmentError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = BTreeSet::new();
        for t in types {
            let t = t.into();
            validate_segment(&t)?;
            set.insert(t);
        }
        Ok(Self { types: set })
    }

    pub fn contains(&self, dialog_type: &str) -> bool {
        self.types.contains(dialog_type)
    }

    /// Identifiers in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.types.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.types.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
