//! Header metadata carried alongside RHT tables and backprojections.

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Keyword → scalar value, ordered by keyword.
pub type Header = BTreeMap<String, Value>;

/// Outcome of [`merge_missing_header_keys`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderMergeSummary {
    pub added: Vec<String>,
    /// Keys absent from the target but not representable as a header card.
    pub skipped: Vec<String>,
}

/// Header keyword rules: 1-8 characters from `A-Z`, `0-9`, `-`, `_`.
pub fn is_valid_keyword(key: &str) -> bool {
    !key.is_empty()
        && key.len() <= 8
        && key
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit() || b == b'-' || b == b'_')
}

/// Copy keys from `incoming` that `header` does not have yet.
///
/// Existing keys are never overwritten. Keys with an invalid keyword or a
/// non-scalar value (array/object) are skipped.
pub fn merge_missing_header_keys(header: &mut Header, incoming: &Header) -> HeaderMergeSummary {
    let mut summary = HeaderMergeSummary::default();
    for (key, value) in incoming {
        if header.contains_key(key) {
            continue;
        }
        if !is_valid_keyword(key) || value.is_array() || value.is_object() {
            debug!("skipping header key {key:?}");
            summary.skipped.push(key.clone());
            continue;
        }
        header.insert(key.clone(), value.clone());
        summary.added.push(key.clone());
    }
    summary
}
