//! Dashboard screen: the signed-in user's course cards.

pub mod state;

#[cfg(target_arch = "wasm32")]
pub(crate) mod view;
