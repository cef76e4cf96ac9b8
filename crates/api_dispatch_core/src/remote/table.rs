use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::failure::{Failure, RemoteError};

/// Attribute value of a scanned item. Only the scalar kinds handlers read are
/// kept; everything else is `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TableValue {
    S(String),
    N(String),
    Bool(bool),
    Other,
}

impl TableValue {
    pub fn as_s(&self) -> Option<&str> {
        match self {
            Self::S(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_n(&self) -> Option<&str> {
        match self {
            Self::N(value) => Some(value),
            _ => None,
        }
    }
}

pub type TableItem = BTreeMap<String, TableValue>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOutput {
    pub count: usize,
    pub items: Vec<TableItem>,
}

pub trait TableService {
    fn scan(&self, table: &str) -> Result<ScanOutput, RemoteError>;
}

/// Single-page scan of `table`.
pub fn scan_table(service: &impl TableService, table: &str) -> Result<ScanOutput, Failure> {
    tracing::info!(table, "scanning table");
    Ok(service.scan(table)?)
}
