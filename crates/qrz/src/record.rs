//! Station records decoded from lookup responses.

use serde::Serialize;
use std::collections::BTreeMap;

/// Envelope and session tags that describe the response rather than the
/// station, and are excluded from decoded records.
const ENVELOPE_TAGS: [&str; 9] = [
    "QRZDatabase",
    "Callsign",
    "Session",
    "Key",
    "Count",
    "SubExp",
    "GMTime",
    "Remark",
    "cpu",
];

/// The attributes of one looked-up station.
///
/// There is no fixed schema; the fields present depend on what the
/// service knows about the callsign. Values preserve the node text as
/// received, and a field can be present with no value at all (an empty
/// element in the response).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StationRecord {
    fields: BTreeMap<String, Option<String>>,
}

impl StationRecord {
    /// Decode a parsed lookup response into a station record.
    ///
    /// Walks every descendant element, takes the namespace-stripped
    /// local tag name, and keeps everything outside the envelope tag
    /// set. On duplicate tags the last occurrence wins.
    pub(crate) fn decode(doc: &roxmltree::Document<'_>) -> Self {
        let mut fields = BTreeMap::new();

        for node in doc.root().descendants().filter(|n| n.is_element()) {
            let tag = node.tag_name().name();
            if ENVELOPE_TAGS.contains(&tag) {
                continue;
            }
            fields.insert(tag.to_string(), node.text().map(str::to_string));
        }

        Self { fields }
    }

    /// Returns the value of a field, if present and non-empty.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(|v| v.as_deref())
    }

    /// Returns the station's callsign, if the response carried one.
    pub fn callsign(&self) -> Option<&str> {
        self.get("call")
    }

    /// Returns true if the field is present, even with no value.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Number of fields in the record.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over field names and values in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }
}
