//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and the single window, and wires the window's
//! surface to the cube renderer. Redraws happen only when the platform asks.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
