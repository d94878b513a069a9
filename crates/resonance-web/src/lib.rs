//! Browser bindings for `resonance-core`.

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
mod channels;
#[cfg(target_arch = "wasm32")]
mod engine;

#[cfg(target_arch = "wasm32")]
pub use engine::{start, ReactiveEngine};
