//! Built-in catalog served when no live DynamoDB connection is available,
//! so the browser stays usable on a machine with no AWS access.

use std::collections::BTreeMap;

use super::{IndexInfo, KeySchemaElement, TableInfo};

pub(crate) fn table_names() -> Vec<String> {
    vec![
        "Users".to_string(),
        "Products".to_string(),
        "Orders".to_string(),
    ]
}

pub(crate) fn table_info(table_name: &str) -> Option<TableInfo> {
    match table_name {
        "Users" => Some(TableInfo {
            table_name: "Users".to_string(),
            key_schema: vec![
                key("UserID", "HASH"),
                key("Email", "RANGE"),
            ],
            attribute_definitions: attributes(&[
                ("UserID", "S"),
                ("Email", "S"),
                ("Username", "S"),
                ("CreatedAt", "N"),
            ]),
            global_secondary_indexes: vec![IndexInfo {
                index_name: "UsernameIndex".to_string(),
                key_schema: vec![key("Username", "HASH")],
            }],
            local_secondary_indexes: vec![IndexInfo {
                index_name: "CreatedAtIndex".to_string(),
                key_schema: vec![key("UserID", "HASH"), key("CreatedAt", "RANGE")],
            }],
        }),
        "Products" => Some(TableInfo {
            table_name: "Products".to_string(),
            key_schema: vec![key("ProductID", "HASH")],
            attribute_definitions: attributes(&[
                ("ProductID", "S"),
                ("Category", "S"),
                ("Price", "N"),
                ("CreateDate", "S"),
            ]),
            global_secondary_indexes: vec![IndexInfo {
                index_name: "CategoryPriceIndex".to_string(),
                key_schema: vec![key("Category", "HASH"), key("Price", "RANGE")],
            }],
            local_secondary_indexes: vec![],
        }),
        "Orders" => Some(TableInfo {
            table_name: "Orders".to_string(),
            key_schema: vec![
                key("CustomerID", "HASH"),
                key("OrderID", "RANGE"),
            ],
            attribute_definitions: attributes(&[
                ("CustomerID", "S"),
                ("OrderID", "S"),
                ("OrderDate", "S"),
                ("Status", "S"),
            ]),
            global_secondary_indexes: vec![IndexInfo {
                index_name: "StatusOrderDateIndex".to_string(),
                key_schema: vec![key("Status", "HASH"), key("OrderDate", "RANGE")],
            }],
            local_secondary_indexes: vec![IndexInfo {
                index_name: "OrderDateIndex".to_string(),
                key_schema: vec![key("CustomerID", "HASH"), key("OrderDate", "RANGE")],
            }],
        }),
        _ => None,
    }
}

fn key(attribute_name: &str, key_type: &str) -> KeySchemaElement {
    KeySchemaElement {
        attribute_name: attribute_name.to_string(),
        key_type: key_type.to_string(),
    }
}

fn attributes(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(name, ty)| (name.to_string(), ty.to_string()))
        .collect()
}
