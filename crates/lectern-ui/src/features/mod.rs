//! Feature slices: state, API wiring and views per screen.
pub mod course;
pub mod dashboard;
pub mod draft;
