//! Z-index component for render ordering.

use bevy_ecs::prelude::Component;

/// Rendering order hint for backdrop layers.
///
/// Higher values are drawn later (on top); the render pass sorts by
/// `ZIndex` to get a painter's algorithm.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct ZIndex(pub i32);
