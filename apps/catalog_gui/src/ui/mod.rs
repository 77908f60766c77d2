//! UI layer: the window shell and the pure list rendering it draws from.

pub mod app;
pub mod list_view;

pub use app::CatalogApp;
