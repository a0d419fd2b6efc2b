//! Core, DOM-free primitives for the course portal.
pub mod config;
pub mod content;
pub mod error;
pub mod key;
pub mod navigation;
pub mod notifications;
pub mod session;
pub mod sidebar;
pub mod store;
pub mod structure;
