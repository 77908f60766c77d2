//! Catalog records, fetch payloads and error types shared by the data source and the viewer.

pub mod domain;
pub mod error;
pub mod protocol;
