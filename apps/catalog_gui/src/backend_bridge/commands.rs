//! Backend commands queued from UI to backend worker.

use client_core::CancelToken;

use crate::controller::events::RequestId;

/// One catalog fetch issued by a mount. Cancelling the token suppresses its result.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub request_id: RequestId,
    pub cancel: CancelToken,
}

pub enum BackendCommand {
    FetchCatalog(FetchRequest),
    Shutdown,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::FetchCatalog(_) => "fetch_catalog",
            Self::Shutdown => "shutdown",
        }
    }
}
