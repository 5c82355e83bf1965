//! Report-class directive lookup.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Report class label to "is direct".
///
/// Labels are matched after trimming; unknown labels are never direct.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportClassDirectives {
    entries: HashMap<String, bool>,
}

impl ReportClassDirectives {
    /// Creates an empty directive map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the directive for a label, replacing any earlier value.
    pub fn insert(&mut self, report_class: &str, is_direct: bool) {
        let key = report_class.trim();
        if !key.is_empty() {
            self.entries.insert(key.to_string(), is_direct);
        }
    }

    /// Returns true if the label is marked direct.
    #[must_use]
    pub fn is_direct(&self, report_class: Option<&str>) -> bool {
        report_class
            .map(str::trim)
            .and_then(|key| self.entries.get(key))
            .copied()
            .unwrap_or(false)
    }

    /// Number of labels configured.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no label is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: AsRef<str>> FromIterator<(K, bool)> for ReportClassDirectives {
    fn from_iter<I: IntoIterator<Item = (K, bool)>>(iter: I) -> Self {
        let mut directives = Self::new();
        for (label, is_direct) in iter {
            directives.insert(label.as_ref(), is_direct);
        }
        directives
    }
}
