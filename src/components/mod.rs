//! ECS components for entities.
//!
//! Submodules overview:
//! - [`backdrop`] – a background layer: placement, scroll, tiling and tint
//! - [`zindex`] – rendering order hint for layering backdrops

pub mod backdrop;
pub mod zindex;
