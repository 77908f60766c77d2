//! Backend-to-UI events and the reducer's input alphabet.

use shared::{domain::CatalogEntry, error::FetchError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub u64);

pub enum UiEvent {
    CatalogLoaded {
        request_id: RequestId,
        entries: Vec<CatalogEntry>,
    },
    CatalogFailed {
        request_id: RequestId,
        error: FetchError,
    },
}

impl UiEvent {
    pub fn from_fetch(
        request_id: RequestId,
        result: Result<Vec<CatalogEntry>, FetchError>,
    ) -> Self {
        match result {
            Ok(entries) => Self::CatalogLoaded {
                request_id,
                entries,
            },
            Err(error) => Self::CatalogFailed { request_id, error },
        }
    }

    pub fn request_id(&self) -> RequestId {
        match self {
            Self::CatalogLoaded { request_id, .. } | Self::CatalogFailed { request_id, .. } => {
                *request_id
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadEvent {
    BeginLoad,
    LoadSucceeded(Vec<CatalogEntry>),
    LoadFailed,
}

impl LoadEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::BeginLoad => "begin-load",
            Self::LoadSucceeded(_) => "load-succeeded",
            Self::LoadFailed => "load-failed",
        }
    }
}
