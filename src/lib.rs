//! Backdrop2D library.
//!
//! A GameMaker-compatible background rendering component: backgrounds are
//! large images packed into shared texture pages, referenced by integer id,
//! and drawn as textured triangle-strip quads through an immediate-mode
//! primitive stream. The crate covers single-quad drawing (plain, stretched,
//! partial region, rotated/scaled, fully general), seamless tiling over the
//! room or an arbitrary bounding box, and backdrop layer entities rendered
//! through the ECS.
//!
//! The actual GPU backend is a collaborator: anything implementing
//! [`graphics::primitives::PrimitiveRenderer`] can consume the vertex stream.

pub mod components;
pub mod graphics;
pub mod resources;
pub mod systems;
