//! Backend bridge: commands queued from the UI and the worker thread that runs fetches.

pub mod commands;
pub mod runtime;
