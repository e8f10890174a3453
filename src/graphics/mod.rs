//! Graphics abstraction layer.
//!
//! Submodules overview
//! - [`primitives`] – immediate-mode vertex stream contract and a recording sink
//! - [`background`] – GameMaker-style background quad and tiling emitters

pub mod background;
pub mod primitives;
