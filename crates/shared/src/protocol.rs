use serde::{Deserialize, Serialize};

use crate::domain::CatalogEntry;

/// Envelope a catalog fetch resolves with: `{ "data": { "information": [...] } }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogResponse {
    pub data: CatalogPayload,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogPayload {
    pub information: Vec<CatalogEntry>,
}

impl CatalogResponse {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self {
            data: CatalogPayload {
                information: entries,
            },
        }
    }

    pub fn into_entries(self) -> Vec<CatalogEntry> {
        self.data.information
    }
}
