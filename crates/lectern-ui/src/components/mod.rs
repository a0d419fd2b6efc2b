//! Shared Yew components.
pub(crate) mod content;
pub(crate) mod course_layout;
pub(crate) mod form_fields;
pub(crate) mod login;
pub(crate) mod navigation;
pub(crate) mod select_instructor;
pub(crate) mod toast;
