//! Room size resource.
//!
//! Stores the current room dimensions in pixels. Unbounded tiling reads this
//! to decide how many tiles are needed to cover the view.

use bevy_ecs::prelude::Resource;

/// Current room size in pixels.
#[derive(Resource, Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoomSize {
    /// Width in pixels.
    pub w: i32,
    /// Height in pixels.
    pub h: i32,
}
