//! Published course screen and the course plumbing shared with the draft editor.
pub mod state;

#[cfg(target_arch = "wasm32")]
pub(crate) mod actions;
#[cfg(target_arch = "wasm32")]
pub(crate) mod hooks;
#[cfg(target_arch = "wasm32")]
pub(crate) mod view;
