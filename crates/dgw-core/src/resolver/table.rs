//! Startup-built lookup table from dialog type to upstream location.

use std::collections::HashMap;

use crate::allow_list::AllowList;
use crate::url_model::{SegmentError, UpstreamLocation, UpstreamTemplate};

/// Read-only map holding one constructed URL per allowed dialog type.
///
/// Holds URL constructions only, never probe outcomes.
#[derive(Debug, Clone)]
pub struct LocationTable {
    entries: HashMap<String, UpstreamLocation>,
}

impl LocationTable {
    pub fn build(template: &UpstreamTemplate, allow_list: &AllowList) -> Result<Self, SegmentError> {
        let entries = allow_list
            .iter()
            .map(|t| template.build(t).map(|loc| (t.to_string(), loc)))
            .collect::<Result<HashMap<_, _>, SegmentError>>()?;
        Ok(Self { entries })
    }

    pub fn get(&self, dialog_type: &str) -> Option<&UpstreamLocation> {
        self.entries.get(dialog_type)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
