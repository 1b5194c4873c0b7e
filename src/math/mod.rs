//! Mathematical primitives for parta-fl.
//!
//! Provides shared math utilities used by the per-class validator:
//!
//! - [`loss`] — cross-entropy and argmax over raw score rows

pub mod loss;

pub use loss::{argmax, cross_entropy};
