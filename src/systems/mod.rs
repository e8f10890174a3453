//! Engine systems.
//!
//! Submodules overview
//! - [`render`] – draw backdrop layers into a primitive sink, back to front
//! - [`scroll`] – advance backdrop pan offsets from scroll speeds and time

pub mod render;
pub mod scroll;
