use std::collections::BTreeMap;

pub mod client;
mod demo;

pub use client::DynamoClient;

/// One element of a table or index key schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySchemaElement {
    pub attribute_name: String,
    /// "HASH" or "RANGE"
    pub key_type: String,
}

/// A global or local secondary index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexInfo {
    pub index_name: String,
    pub key_schema: Vec<KeySchemaElement>,
}

/// Schema description of a DynamoDB table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableInfo {
    pub table_name: String,
    pub key_schema: Vec<KeySchemaElement>,
    /// Attribute name to scalar type ("S", "N", "B")
    pub attribute_definitions: BTreeMap<String, String>,
    pub global_secondary_indexes: Vec<IndexInfo>,
    pub local_secondary_indexes: Vec<IndexInfo>,
}
