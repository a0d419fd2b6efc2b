//! Browser-only service clients.
pub mod api;
