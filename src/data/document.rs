use std::collections::BTreeMap;

use log::warn;
use serde::Serialize;

/// Keys owned by the record itself. Passthrough fields never shadow them.
pub const RESERVED_KEYS: [&str; 5] = ["type", "created", "pos", "address", "node_refs"];

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RecordType {
    Node,
    Way,
}

/// A shaped element, one line in the output file.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Record {
    #[serde(rename = "type")]
    pub record_type: RecordType,
    pub created: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pos: Option<[f64; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_refs: Option<Vec<String>>,
    #[serde(flatten)]
    pub fields: BTreeMap<String, String>,
}

impl Record {
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }
}

/// Accumulates the parts of a record while an element is being shaped.
#[derive(Debug, Default)]
pub struct RecordBuilder {
    created: BTreeMap<String, String>,
    pos: Option<[f64; 2]>,
    address: BTreeMap<String, String>,
    node_refs: Vec<String>,
    fields: BTreeMap<String, String>,
}

impl RecordBuilder {
    pub fn new() -> Self {
        RecordBuilder::default()
    }

    pub fn insert_created(&mut self, key: String, value: String) {
        self.created.insert(key, value);
    }

    pub fn set_pos(&mut self, lat: f64, lon: f64) {
        self.pos = Some([lat, lon]);
    }

    pub fn insert_address(&mut self, field: String, value: String) {
        self.address.insert(field, value);
    }

    pub fn push_node_ref(&mut self, node_ref: String) {
        self.node_refs.push(node_ref);
    }

    /// Later values for the same key replace earlier ones.
    pub fn insert_field(&mut self, key: String, value: String) {
        if RESERVED_KEYS.contains(&key.as_str()) {
            warn!(key = key.as_str(), value = value.as_str(); "Dropping field that collides with a reserved key");
            return;
        }
        self.fields.insert(key, value);
    }

    pub fn build(self, record_type: RecordType) -> Record {
        Record {
            record_type,
            created: self.created,
            pos: self.pos,
            address: if self.address.is_empty() { None } else { Some(self.address) },
            node_refs: if self.node_refs.is_empty() { None } else { Some(self.node_refs) },
            fields: self.fields,
        }
    }
}
